#[cfg(test)]
mod lifecycle;
#[cfg(test)]
mod selection;
#[cfg(test)]
mod utils;
