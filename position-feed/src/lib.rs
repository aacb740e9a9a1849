//! A cancellable stream of device positions.
//!
//! [`watch_position`] reads a [`PositionSource`] on a background thread and
//! delivers [`PositionEvent`]s through a [`Subscription`] until the source is
//! exhausted or the subscription is cleared.

pub mod event;
pub mod feed_error;
pub mod source;
pub mod subscription;

pub use event::{PositionEvent, PositionFix};
pub use feed_error::FeedError;
pub use source::{PositionSource, RandomWalk, TrackReplay};
pub use subscription::{watch_position, FeedOptions, Subscription, MAX_BACKLOG};
