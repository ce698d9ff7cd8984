// ┌────────────────────────── sim/ layout ───────────────────────────┐
// │ entities.rs │ Hero, Projectile, Enemy, Tier                      │
// │ spawner.rs  │ rejection sampled enemy placement                  │
// │ physics.rs  │ steering, projectile motion, pursuit, hit tests    │
// │ phase.rs    │ Playing / Defeat / Victory phase state machine     │
// │ timers.rs   │ one-shot tick timers, score pulse                  │
// │ state.rs    │ GameState aggregate and the per-tick update        │
// │ render.rs   │ Surface trait and the frame drawn from GameState   │
// │ collab.rs   │ Audio and Overlay capabilities                     │
// └────────────────────────────────────────────────────────────────────┘
// Nothing in here touches the DOM, so all of it runs under plain cargo test.
pub mod collab;
pub mod entities;
pub mod phase;
pub mod physics;
pub mod render;
pub mod spawner;
pub mod state;
pub mod timers;

pub use self::collab::{Audio, Effects, Overlay, Panel, Track};
pub use self::entities::{Enemy, Hero, Projectile, Tier};
pub use self::phase::Phase;
pub use self::render::{render, Sprite, Surface};
pub use self::state::GameState;
