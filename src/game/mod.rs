//! Core simulation
//!
//! Everything that decides game state lives here; drawing lives in the
//! presentation modules. One tick = input sampling, chain advance,
//! attachment sync, attacks, projectile kinematics, collision resolve,
//! prune - strictly in that order, single-threaded, single-writer.
//!
//! Key pieces:
//! - SegmentChain: follow-chain body simulation
//! - SlotTable + Attachment: slot binding and the drag state machine
//! - WeaponKind: per-type attack strategies with velocity inheritance
//! - ProjectileSet: shots and melee sweeps with tick lifespans
//! - Npc: move-to-target characters with one-way death
//! - combat::resolve: the per-tick hit pass

// Allow unused code - parts of the core surface are exercised only by tests
#![allow(dead_code)]

pub mod attachment;
pub mod chain;
pub mod combat;
pub mod event;
pub mod health;
pub mod npc;
pub mod player;
pub mod projectile;
pub mod slots;
pub mod weapons;

pub use attachment::{Attachment, Grip};
pub use chain::SegmentChain;
pub use event::{BindingEvent, Events};
pub use health::Health;
pub use npc::{AnimState, Npc, NpcKind};
pub use player::Player;
pub use projectile::ProjectileSet;
pub use slots::{AttachmentId, SlotTable};
pub use weapons::WeaponKind;
