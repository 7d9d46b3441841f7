pub mod adb;
pub mod file;
pub mod transport;

pub use adb::AdbTransport;
pub use file::FileTransport;
pub use transport::CaptureTransport;
