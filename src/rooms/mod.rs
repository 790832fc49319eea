//! Rooms a party can enter on the map.

#![allow(unused_imports)]

pub mod battle;
pub mod chat;
pub mod node;
pub mod rest;
pub mod result;
pub mod scaling;
pub mod shop;

pub use battle::*;
pub use chat::*;
pub use node::*;
pub use rest::*;
pub use result::*;
pub use scaling::*;
pub use shop::*;
