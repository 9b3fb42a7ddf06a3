//! # gilt-scene
//!
//! A retained-mode UI core: a tree of drawables, a flow positioner, an input
//! pipeline with hit-testing, bubbling and focus, and a frame orchestrator with
//! timed executors. Pixels are somebody else's job: the core draws through the
//! [`render::Surface`] trait.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Vec2, Bounds, Axis primitives
//! - **[`dom`]**: Slotmap-backed drawable arena with tree operations and queries
//! - **[`layout`]**: Alignment policy, dynamic units and the flow positioner
//! - **[`clock`]**: Delta-time clock and scheduled executors
//! - **[`event`]**: Raw input, dispatched events, handlers, key bindings, focus
//! - **[`animate`]**: Easing, timed animations and drawable ops
//! - **[`render`]**: Drawing surface trait and a recording backend
//! - **[`widget`]**: Widget trait, lifecycle tracking, scroll state
//! - **[`widgets`]**: Built-in widgets: Group, Block, Text, Button
//! - **[`config`]**: Settings with TOML loading
//! - **[`app`]**: The `Ui` frame orchestrator tying everything together
//! - **[`testing`]**: Headless Pilot and snapshot helpers

// Foundation
pub mod geometry;

// Core systems
pub mod dom;
pub mod layout;
pub mod clock;

// Widget system
pub mod widget;
pub mod widgets;

// Events and animation
pub mod event;
pub mod animate;

// Rendering
pub mod render;

// Application
pub mod config;
pub mod app;

// Testing
pub mod testing;
