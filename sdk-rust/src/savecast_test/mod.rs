mod doubles;

pub use doubles::{MockPublishResult, MockPublisher, MockSaveSource};
