pub use self::order::{OrderPayload, LineItem};
pub use self::options::{ReceiptOptions, Logo};
pub use self::test_page::TestPage;

mod columns;
mod layout;
mod options;
mod order;
mod test_page;
