//! ChampDex - League of Legends champion browser for the terminal
//!
//! The library holds the store (state, actions, reducer, effects), the search
//! engine and its kana helpers, and the UI components. The binary wires them
//! to the terminal and the network.

pub mod action;
pub mod api;
pub mod components;
pub mod counter;
pub mod custom;
pub mod effect;
pub mod error;
pub mod favorites;
pub mod kana;
pub mod reducer;
pub mod search;
pub mod state;
pub mod tag;
