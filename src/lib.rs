pub use halfcast_internal::*;
