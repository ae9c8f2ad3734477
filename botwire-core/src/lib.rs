//! # botwire-core
//!
//! Core types and traits for the botwire runtime: the [`Update`] union and the
//! platform types the runtime touches, the [`Error`] taxonomy, handler traits,
//! and tracing initialization. Transport-agnostic; used by botwire-dispatch
//! and botwire.

pub mod error;
pub mod handler;
pub mod logger;
pub mod types;

pub use error::{Error, Result};
pub use handler::{Command, CommandHandler, FallbackHandler, UpdateHandler};
pub use logger::init_tracing;
pub use types::{
    ApiResponse, CallbackQuery, Chat, ChatJoinRequest, ChatMemberUpdated, ChosenInlineResult,
    EditResult, FileInfo, InlineQuery, InputFile, Message, Poll, PollAnswer, PreCheckoutQuery,
    ResponseParameters, ShippingQuery, Update, UpdateKind, User,
};
