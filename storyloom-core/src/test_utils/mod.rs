//! Test doubles shared across the workspace (feature `test-utils`,
//! mirroring the teacher's `layer0::test_utils`).

mod mock_provider;

pub use mock_provider::MockProvider;
