// Communication module - Payload encoding, writer loop and reader task
pub mod payload;
pub mod reader;
pub mod repeat;
pub mod writer;

pub use payload::{EncodedBytes, PayloadEncoding, WritePayload};
pub use reader::ReaderTask;
pub use repeat::{RepeatPolicy, RepeatSchedule};
pub use writer::{transmit, TransmitReport};
