pub use self::instruction::{Instruction, MAX_SCALE};
pub use self::justification::{Justification};
pub use self::style::{Style, TextStyle};
pub use self::bitmap::Bitmap;

mod instruction;
mod justification;
mod style;
mod bitmap;
