//! # Internal Macros
//!
//! This module provides internal macros for reducing boilerplate in segmap.
//!
//! ## scalar_accessors!
//!
//! Generates typed getter and setter methods for fixed-width scalars on the
//! `BufferView` trait. Each pair is built on the trait's required byte-range
//! primitives and honors the view's `ByteOrder`.
//!
//! ### Usage
//!
//! ```ignore
//! pub trait BufferView {
//!     fn byte_order(&self) -> ByteOrder;
//!     fn get_bytes_into(&self, idx: u64, dst: &mut [u8]) -> eyre::Result<()>;
//!     fn put_bytes(&self, idx: u64, src: &[u8]) -> eyre::Result<()>;
//!
//!     scalar_accessors! {
//!         u32,
//!         f64,
//!     }
//! }
//!
//! // Generates:
//! // fn get_u32(&self, idx: u64) -> eyre::Result<u32> { ... }
//! // fn put_u32(&self, idx: u64, value: u32) -> eyre::Result<()> { ... }
//! // fn get_f64(&self, idx: u64) -> eyre::Result<f64> { ... }
//! // fn put_f64(&self, idx: u64, value: f64) -> eyre::Result<()> { ... }
//! ```

/// Generates provided get/put methods for fixed-width scalars inside a trait
/// that exposes `byte_order`, `get_bytes_into` and `put_bytes`.
#[macro_export]
macro_rules! scalar_accessors {
    (@impl $ty:ident) => {
        ::paste::paste! {
            #[inline]
            fn [<get_ $ty>](&self, idx: u64) -> ::eyre::Result<$ty> {
                let mut raw = [0u8; ::std::mem::size_of::<$ty>()];
                self.get_bytes_into(idx, &mut raw)?;
                Ok(match self.byte_order() {
                    $crate::buffer::ByteOrder::Big => $ty::from_be_bytes(raw),
                    $crate::buffer::ByteOrder::Little => $ty::from_le_bytes(raw),
                })
            }

            #[inline]
            fn [<put_ $ty>](&self, idx: u64, value: $ty) -> ::eyre::Result<()> {
                let raw = match self.byte_order() {
                    $crate::buffer::ByteOrder::Big => value.to_be_bytes(),
                    $crate::buffer::ByteOrder::Little => value.to_le_bytes(),
                };
                self.put_bytes(idx, &raw)
            }
        }
    };
    ($($ty:ident),* $(,)?) => {
        $(
            $crate::scalar_accessors!(@impl $ty);
        )*
    };
}
