//! # State Module
//!
//! State shared across views.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CartProvider │  │   Toaster    │  │    AppConfig     │              │
//! │  │              │  │              │  │                  │              │
//! │  │ Mutex<Cart>  │  │ Arc<Mutex<   │  │  store_name      │              │
//! │  │ borrowed as  │  │  Vec<Toast>  │  │  currency        │              │
//! │  │ CartContext  │  │ >>           │  │  simulated faults│              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  • CartProvider: owned by the page root, contexts borrow it            │
//! │  • Toaster: cheap to clone, clones share one queue, toasts expire      │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod toast;

pub use cart::{Cart, CartContext, CartItem, CartProvider, CartTotals};
pub use config::AppConfig;
pub use toast::{Toast, ToastKind, Toaster, DEFAULT_TOAST_TTL};
