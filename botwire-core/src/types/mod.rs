//! Platform data types the runtime itself touches.
//!
//! Only the subset needed for routing, editing, and file transfer is modeled;
//! the platform's full schema is the caller's concern.

mod chat;
mod input_file;
mod message;
mod response;
mod update;
mod user;

pub use chat::Chat;
pub use input_file::InputFile;
pub use message::Message;
pub use response::{ApiResponse, EditResult, FileInfo, ResponseParameters};
pub use update::{
    CallbackQuery, ChatJoinRequest, ChatMemberUpdated, ChosenInlineResult, InlineQuery, Poll,
    PollAnswer, PreCheckoutQuery, ShippingQuery, Update, UpdateKind,
};
pub use user::User;
