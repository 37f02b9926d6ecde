// A tiny error type so the library doesn't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Presenting the back buffer failed
    AssetLoad(String),    // The embedded sprite data is malformed
    SurfaceSize { width: usize, height: usize }, // A surface can't have zero area
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::AssetLoad(s) => write!(f, "Asset load error: {s}"),
            Error::SurfaceSize { width, height } => {
                write!(f, "Surface size error: {width}x{height} has no pixels")
            }
        }
    }
}

impl std::error::Error for Error {}
