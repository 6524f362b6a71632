//! Draws QR codes with ANSI background colours, two terminal columns per module.

use std::io::{self, Write};

use qrcode::{Color, EcLevel, QrCode};
use webshare_core::selection::Presenter;

pub const BLACK: &str = "\x1b[40m  \x1b[0m";
pub const WHITE: &str = "\x1b[47m  \x1b[0m";

pub struct QrConfig {
    pub level: EcLevel,
    /// Border width in modules.
    pub quiet_zone: usize,
    /// Cell drawn for dark modules.
    pub dark: &'static str,
    /// Cell drawn for light modules and the quiet zone.
    pub light: &'static str,
}

impl Default for QrConfig {
    // Inverted so the code reads on dark terminal backgrounds.
    fn default() -> Self {
        Self {
            level: EcLevel::M,
            quiet_zone: 1,
            dark: WHITE,
            light: BLACK,
        }
    }
}

pub struct TerminalQr<W: Write> {
    writer: W,
    config: QrConfig,
}

impl TerminalQr<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), QrConfig::default())
    }
}

impl<W: Write> TerminalQr<W> {
    pub fn new(writer: W, config: QrConfig) -> Self {
        Self { writer, config }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for TerminalQr<W> {
    fn present(&mut self, url: &str) -> anyhow::Result<()> {
        let drawing: String = render(url, &self.config)?;
        self.writer.write_all(drawing.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn render(data: &str, config: &QrConfig) -> anyhow::Result<String> {
    let code: QrCode = QrCode::with_error_correction_level(data.as_bytes(), config.level)?;
    let width: usize = code.width();
    let colors: Vec<Color> = code.to_colors();

    let border: String = config.light.repeat(config.quiet_zone);
    let quiet_row: String = format!("{}\n", config.light.repeat(width + 2 * config.quiet_zone));

    let mut out = String::new();
    for _ in 0..config.quiet_zone {
        out.push_str(&quiet_row);
    }
    for row in colors.chunks(width) {
        out.push_str(&border);
        for module in row {
            out.push_str(match module {
                Color::Dark => config.dark,
                Color::Light => config.light,
            });
        }
        out.push_str(&border);
        out.push('\n');
    }
    for _ in 0..config.quiet_zone {
        out.push_str(&quiet_row);
    }
    Ok(out)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
