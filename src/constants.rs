// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// API group served by the RancherVM controllers
pub const GROUP: &str = "vm.rancher.io";

/// API version of the group this client is generated for
pub const VERSION: &str = "v1alpha1";

/// Credential resource naming
pub mod credentials {
    pub const KIND: &str = "Credential";
    /// Resource path segment under the group/version
    pub const PLURAL: &str = "credentials";
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Watch defaults
pub mod watch {
    /// Server-side timeout for a single watch request. The API server rejects values of 295 and above.
    pub const DEFAULT_TIMEOUT_SECS: u32 = 290;
    pub const MAX_TIMEOUT_SECS: u32 = 295;
    /// Resource version used to start a watch when the caller did not pin one
    pub const DEFAULT_RESOURCE_VERSION: &str = "0";
}
