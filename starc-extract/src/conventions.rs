//! Fixed names from the target SDK's execution protocol.

/// Method invoked to register a processing unit explicitly.
pub const REGISTER_METHOD: &str = "RegisterDoFn";

/// Modules whose `RegisterDoFn` is recognized.
pub const REGISTER_MODULES: &[&str] = &["beam", "genx"];

/// Module and function of the reflection primitive stripped from
/// registration arguments.
pub const REFLECT_MODULE: &str = "reflect";
pub const TYPE_OF: &str = "TypeOf";

/// Package initializers are never registered.
pub const PACKAGE_INITIALIZER: &str = "init";

/// Stamped into the generation model.
pub const TOOL_NAME: &str = "starcgen";

/// Types from this module are intrinsic to the SDK and never registered.
pub const DEFAULT_UNIVERSAL_MODULE: &str = "github.com/apache/beam/sdks/v2/go/pkg/beam/core/typex";

/// Module name whose qualifier is dropped from generated identifiers.
pub const SDK_MODULE: &str = "beam";

/// Lifecycle methods of structural DoFns, CombineFns and splittable DoFns.
pub const LIFECYCLE_METHODS: &[&str] = &[
    "Setup",
    "StartBundle",
    "ProcessElement",
    "FinishBundle",
    "Teardown",
    "CreateAccumulator",
    "AddInput",
    "MergeAccumulators",
    "ExtractOutput",
    "Compact",
    "CreateInitialRestriction",
    "SplitRestriction",
    "RestrictionSize",
    "CreateTracker",
    "TruncateRestriction",
    "CreateWatermarkEstimator",
    "InitialWatermarkEstimatorState",
    "WatermarkEstimatorState",
    "OnTimer",
];

pub fn is_lifecycle_method(name: &str) -> bool {
    LIFECYCLE_METHODS.contains(&name)
}

pub fn is_register_module(name: &str) -> bool {
    REGISTER_MODULES.contains(&name)
}
