//! Photo texture binding.
//!
//! Each photo particle gets one `TextureRequest` that the host resolves out
//! of band. The engine keeps the receiving half and polls it once per frame,
//! so completion never blocks the frame loop. Dropping the registry (or
//! cancelling it) drops every receiver, after which completing a ticket is a
//! no-op.

use std::collections::HashMap;
use futures::channel::oneshot;
use crate::api::error::AssetError;
use crate::api::types::{ParticleId, TextureHandle};
use crate::assets::manifest::PhotoSource;
use crate::core::pool::ParticlePool;

type TextureResult = Result<TextureHandle, AssetError>;

/// Completion handle for one photo request, held by the host.
#[derive(Debug)]
pub struct TextureTicket {
    sender: oneshot::Sender<TextureResult>,
}

impl TextureTicket {
    /// Report a resolved texture. Returns false if the scene no longer waits
    /// for it (particle rebuilt or scene disposed).
    pub fn resolve(self, handle: TextureHandle) -> bool {
        self.sender.send(Ok(handle)).is_ok()
    }

    /// Report a failed resolution; the particle falls back to the placeholder.
    pub fn fail(self, error: AssetError) -> bool {
        self.sender.send(Err(error)).is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.sender.is_canceled()
    }
}

/// Work item handed to the host: load `source` and complete `ticket`.
#[derive(Debug)]
pub struct TextureRequest {
    pub particle: ParticleId,
    pub source: PhotoSource,
    pub ticket: TextureTicket,
}

#[derive(Debug)]
enum Binding {
    Pending(oneshot::Receiver<TextureResult>),
    Bound(TextureHandle),
}

/// Texture bindings of every photo particle in a pool.
#[derive(Debug)]
pub struct TextureRegistry {
    bindings: HashMap<ParticleId, Binding>,
    outgoing: Vec<TextureRequest>,
    placeholder: TextureHandle,
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new(TextureHandle::PLACEHOLDER)
    }
}

impl TextureRegistry {
    /// Empty registry binding failures to `placeholder`.
    pub fn new(placeholder: TextureHandle) -> Self {
        Self {
            bindings: HashMap::new(),
            outgoing: Vec::new(),
            placeholder,
        }
    }

    /// Open one request per photo particle of `pool`.
    pub fn request_all(pool: &ParticlePool, photos: &[PhotoSource], placeholder: TextureHandle) -> Self {
        let mut registry = Self::new(placeholder);
        for id in pool.photo_ids() {
            let source = pool
                .get(*id)
                .and_then(|p| p.kind().photo_reference())
                .and_then(|r| photos.get(r));
            match source {
                Some(source) => registry.request(*id, source.clone()),
                None => {
                    log::warn!("photo particle {} has no source, using placeholder", id.0);
                    registry.bindings.insert(*id, Binding::Bound(placeholder));
                }
            }
        }
        registry
    }

    fn request(&mut self, particle: ParticleId, source: PhotoSource) {
        let (sender, receiver) = oneshot::channel();
        self.bindings.insert(particle, Binding::Pending(receiver));
        self.outgoing.push(TextureRequest {
            particle,
            source,
            ticket: TextureTicket { sender },
        });
    }

    /// Hand out requests that have not been taken yet.
    pub fn take_requests(&mut self) -> Vec<TextureRequest> {
        std::mem::take(&mut self.outgoing)
    }

    /// Collect finished requests without blocking. Failures and abandoned
    /// tickets bind the placeholder; either outcome is final.
    /// Returns the number of bindings that completed.
    pub fn poll(&mut self) -> usize {
        let placeholder = self.placeholder;
        let mut completed = 0;
        for (id, binding) in self.bindings.iter_mut() {
            let Binding::Pending(receiver) = binding else {
                continue;
            };
            let handle = match receiver.try_recv() {
                Ok(None) => continue,
                Ok(Some(Ok(handle))) => handle,
                Ok(Some(Err(err))) => {
                    log::warn!("photo particle {}: {}, using placeholder", id.0, err);
                    placeholder
                }
                Err(oneshot::Canceled) => {
                    log::warn!("photo particle {}: ticket dropped, using placeholder", id.0);
                    placeholder
                }
            };
            *binding = Binding::Bound(handle);
            completed += 1;
        }
        completed
    }

    /// Bound texture of a photo particle, `None` while unresolved.
    pub fn texture_of(&self, particle: ParticleId) -> Option<TextureHandle> {
        match self.bindings.get(&particle) {
            Some(Binding::Bound(handle)) => Some(*handle),
            _ => None,
        }
    }

    /// Distinct photo textures bound so far, placeholder excluded.
    pub fn bound_textures(&self) -> Vec<TextureHandle> {
        let mut handles: Vec<TextureHandle> = self
            .bindings
            .values()
            .filter_map(|b| match b {
                Binding::Bound(handle) if *handle != self.placeholder => Some(*handle),
                _ => None,
            })
            .collect();
        handles.sort_by_key(|h| h.0);
        handles.dedup();
        handles
    }

    pub fn pending(&self) -> usize {
        self.bindings
            .values()
            .filter(|b| matches!(b, Binding::Pending(_)))
            .count()
    }

    /// Drop every binding and untaken request. Outstanding tickets become no-ops.
    pub fn cancel_all(&mut self) {
        let pending = self.pending();
        if pending > 0 {
            log::debug!("cancelling {} pending photo requests", pending);
        }
        self.bindings.clear();
        self.outgoing.clear();
    }
}
