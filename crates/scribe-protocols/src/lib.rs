//! # Scribe Protocols
//!
//! Core protocol definitions (traits) for Scribe.
//! Contains only interface definitions and shared data types - no implementations.
//!
//! ## Core Traits
//!
//! - [`TextProvider`] - Trait for remote text-generation backends
//! - [`SettingsStore`] - Trait for the persisted key-value settings store
//! - [`Surface`] - Trait for the host rendering and event surface

pub mod error;
pub mod provider;
pub mod settings;
pub mod surface;

pub use error::{ProviderError, StoreError};
pub use provider::TextProvider;
pub use settings::{ProviderId, SettingKey, Settings, SettingsChange, SettingsStore};
pub use surface::{
    ElementDescriptor, ElementId, EventKind, Overlay, OverlayAction, OverlayKind, Point, Rect,
    Subscription, Surface, SurfaceEvent, ToastTone,
};
