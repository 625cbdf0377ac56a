//! The bootstrap ordering as checkable data.
//!
//! `GpuState::new` must create resources in an order where every step's
//! inputs already exist. Rather than leaving that order implied by call
//! sequence, it is written down here and validated by a unit test (and a
//! debug assertion at bootstrap).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BootstrapStep {
    NegotiateLimits,
    CreateDevice,
    ConfigureSurface,
    BuildRenderPipeline,
    BuildComputePipeline,
    BuildGeometry,
    CreateUniformBuffer,
    CreateHeightTexture,
    CreateDepthTarget,
    WireBindGroups,
}

use BootstrapStep::*;

/// Execution order with each step's declared dependencies.
pub(crate) const BOOTSTRAP_PLAN: &[(BootstrapStep, &[BootstrapStep])] = &[
    (NegotiateLimits, &[]),
    (CreateDevice, &[NegotiateLimits]),
    (ConfigureSurface, &[CreateDevice]),
    (BuildRenderPipeline, &[CreateDevice, ConfigureSurface]),
    (BuildComputePipeline, &[CreateDevice]),
    (BuildGeometry, &[CreateDevice]),
    (CreateUniformBuffer, &[CreateDevice]),
    (CreateHeightTexture, &[CreateDevice]),
    (CreateDepthTarget, &[CreateDevice, ConfigureSurface]),
    (
        WireBindGroups,
        &[
            BuildRenderPipeline,
            BuildComputePipeline,
            CreateUniformBuffer,
            CreateHeightTexture,
        ],
    ),
];

/// True when every dependency appears earlier in the plan than the step
/// that needs it.
pub(crate) fn dependencies_precede_steps() -> bool {
    BOOTSTRAP_PLAN.iter().enumerate().all(|(position, (_, deps))| {
        deps.iter().all(|dep| {
            BOOTSTRAP_PLAN[..position]
                .iter()
                .any(|(earlier, _)| earlier == dep)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_is_topologically_consistent() {
        assert!(dependencies_precede_steps());
    }

    #[test]
    fn plan_lists_each_step_once() {
        for (position, (step, _)) in BOOTSTRAP_PLAN.iter().enumerate() {
            assert!(
                !BOOTSTRAP_PLAN[..position]
                    .iter()
                    .any(|(earlier, _)| earlier == step),
                "{step:?} appears twice"
            );
        }
    }

    #[test]
    fn wiring_is_the_final_step() {
        let (last, _) = BOOTSTRAP_PLAN.last().expect("plan is non-empty");
        assert_eq!(*last, WireBindGroups);
    }
}
