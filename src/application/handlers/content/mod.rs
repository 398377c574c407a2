//! Content lifecycle handlers.

mod create_content;
mod delete_content;
mod get_content;
mod list_owned_content;
mod update_content;

pub use create_content::{CreateContentCommand, CreateContentHandler};
pub use delete_content::{DeleteContentCommand, DeleteContentHandler};
pub use get_content::{GetContentHandler, GetContentQuery, GetContentResult};
pub use list_owned_content::{ListOwnedContentHandler, ListOwnedContentQuery};
pub use update_content::{UpdateContentCommand, UpdateContentHandler};
