pub mod buffer;

pub use buffer::WindowBuffer;
