use core::fmt;

use crate::config::ConfigError;

/// Anything that can stop a frame from reaching the screen.
///
/// `SE` is the sensor driver's error and `DE` the display's.
#[derive(Debug)]
pub enum Error<SE, DE> {
    Sensor(SE),
    Display(DE),
    Config(ConfigError),
}

impl<SE, DE> From<ConfigError> for Error<SE, DE> {
    fn from(error: ConfigError) -> Self {
        Error::Config(error)
    }
}

impl<SE: fmt::Debug, DE: fmt::Debug> fmt::Display for Error<SE, DE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Sensor(e) => write!(f, "sensor error: {e:?}"),
            Error::Display(e) => write!(f, "display error: {e:?}"),
            Error::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}
