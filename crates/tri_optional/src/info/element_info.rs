use core::any::{TypeId, type_name};
use core::fmt;

use crate::Optional;
use crate::element::{Element, ElementKind};
use crate::registry::{OptionalCodec, TypedCodec};

/// Everything needed to build a codec for `Optional<T>` without naming `T`.
///
/// Built by [`ElementInfo::of`]; the codec factory is
/// [`TypedCodec::<T>`](TypedCodec) unless replaced with
/// [`with_codec`](Self::with_codec).
#[derive(Clone, Copy)]
pub struct ElementInfo {
    type_id: TypeId,
    type_path: &'static str,
    optional_type_id: TypeId,
    optional_type_path: &'static str,
    kind: ElementKind,
    nullable: bool,
    codec: fn() -> Box<dyn OptionalCodec>,
}

impl ElementInfo {
    pub fn of<T: Element>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path(),
            optional_type_id: TypeId::of::<Optional<T>>(),
            optional_type_path: type_name::<Optional<T>>(),
            kind: T::KIND,
            nullable: T::NULLABLE,
            codec: TypedCodec::<T>::boxed,
        }
    }

    /// Replaces the codec factory.
    ///
    /// The factory must build a codec for this same element type, the codec
    /// cache rejects it otherwise.
    pub const fn with_codec(mut self, codec: fn() -> Box<dyn OptionalCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// The [`TypeId`] of the element `T`.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The [`TypeId`] of `Optional<T>`.
    #[inline]
    pub const fn optional_type_id(&self) -> TypeId {
        self.optional_type_id
    }

    #[inline]
    pub const fn optional_type_path(&self) -> &'static str {
        self.optional_type_path
    }

    #[inline]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Runs the codec factory.
    #[inline]
    pub fn build_codec(&self) -> Box<dyn OptionalCodec> {
        (self.codec)()
    }
}

impl fmt::Debug for ElementInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementInfo")
            .field("type_path", &self.type_path)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}
