use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Allocates a process-unique id.
            pub fn fresh() -> Self {
                Self(next_id())
            }

            #[inline]
            pub const fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

resource_id!(
    /// Identity of a CPU mesh; keys the renderer's vertex buffer cache.
    MeshId
);
resource_id!(
    /// Identity of a CPU texture; keys the renderer's GPU texture cache.
    TextureId
);
resource_id!(
    /// Identity of an offscreen render target. Stable across resizes.
    TargetId
);
resource_id!(
    /// Identity of a shader program; keys the renderer's pipeline cache.
    ShaderId
);
