//! Behavior of the portfolio page, modelled without a browser.
//!
//! Every widget owns its state and lives inside a [`Page`]. Browser events
//! arrive as [`UiEvent`]s, deferred work is a [`Task`] on the page's
//! [`Scheduler`], and anything that must leave the page (an HTTP post, a
//! scroll) comes back out as an [`Effect`].

pub mod client;
pub mod contact;
pub mod driver;
pub mod nav;
pub mod notification;
pub mod page;
pub mod particles;
pub mod projects;
pub mod scheduler;
pub mod theme;
pub mod typing;

pub use client::{ClientError, ContactClient};
pub use page::{Effect, Field, KeyTarget, Page, PageConfig, Task, UiEvent};
pub use scheduler::{Scheduler, TimerId};
