//! In-memory [`IdentityProvider`] whose credentials can be rotated at runtime.

// self
use crate::{
	_prelude::*,
	installation::{IdentityData, IdentityFuture, IdentityProvider},
};

/// Identity held behind a shared lock; clones observe the same credentials.
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentity(Arc<RwLock<IdentityData>>);
impl MemoryIdentity {
	/// Creates a provider seeded with `data`.
	pub fn new(data: IdentityData) -> Self {
		Self(Arc::new(RwLock::new(data)))
	}

	/// Replaces the stored identity.
	pub fn replace(&self, data: IdentityData) {
		*self.0.write() = data;
	}

	/// Mutates the stored identity in place.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut IdentityData),
	{
		f(&mut self.0.write());
	}

	/// Returns a copy of the stored identity.
	pub fn snapshot(&self) -> IdentityData {
		self.0.read().clone()
	}
}
impl IdentityProvider for MemoryIdentity {
	fn identity(&self) -> IdentityFuture<'_, IdentityData> {
		Box::pin(async move { Ok(self.snapshot()) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn updates_are_visible_to_clones() {
		let identity = MemoryIdentity::default();
		let observer = identity.clone();

		identity.update(|data| data.access_token = Some("rotated".into()));

		let data = observer.identity().await.expect("Identity read should succeed.");

		assert_eq!(data.access_token.as_deref(), Some("rotated"));
	}
}
