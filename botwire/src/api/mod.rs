//! Outbound request plumbing: typed parameters, body encoding, HTTP send,
//! and response decoding.

pub mod decode;
pub mod encode;
pub mod params;
pub mod requests;
pub mod transport;

pub use decode::{decode_edit_result, decode_response};
pub use encode::{encode_params, EncodedBody, RequestBody};
pub use params::{ParamValue, Params, ParseMode};
pub use requests::{
    AnswerCallbackQuery, EditMessageText, GetFile, GetUpdates, SendDocument, SendMessage,
    SendPhoto, SetWebhook,
};
pub use transport::{Transport, REDACTED};
