//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! - one `FrameClock` per render loop; `tick()` once per presented frame
//! - `FpsCounter` for frame statistics

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
