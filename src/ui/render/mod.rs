mod all;
mod auth;
mod footer;
mod header;
mod items;
mod log;

use self::log::log;
use super::*;
use auth::{login, register};
use footer::footer;
use header::header;
use items::items;

pub use all::all as render;
pub use items::{item_rows, ItemRow};
