//! Headless viewer harness
//!
//! Drives a [`ViewerState`] against an in-memory platform so viewer behavior
//! can be exercised without a browser. The platform answers requests
//! asynchronously: granted or denied requests only take effect when queued
//! platform signals are delivered.

use crate::affordance::Affordances;
use crate::device::DeviceProfile;
use crate::fullscreen::{FullscreenProbe, NativeFullscreen, RequestOutcome, Surface, Vendor, VendorEntryPoints};
use crate::state::{ViewerMode, ViewerState};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// How the headless platform answers a request on one surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestPolicy {
    /// Accept asynchronously
    Grant,
    /// Reject asynchronously
    Deny,
    /// Reject synchronously
    Refuse,
    /// No request entry point on this surface
    Missing,
}

/// Notification queued by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformSignal {
    /// A vendor fullscreen change event
    FullscreenChanged(Vendor),
    /// A pending request promise rejected
    RequestRejected(Surface),
}

/// In-memory vendor entry points
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    vendors: Vec<Vendor>,
    frame: RequestPolicy,
    container: RequestPolicy,
    held: Option<Surface>,
    outstanding: VecDeque<(Vendor, Surface)>,
    signals: VecDeque<PlatformSignal>,
    requests: Vec<(Vendor, Surface)>,
}

impl HeadlessPlatform {
    /// Platform offering the given vendors, granting every request
    #[must_use]
    pub fn new(vendors: impl IntoIterator<Item = Vendor>) -> Self {
        Self {
            vendors: vendors.into_iter().collect(),
            frame: RequestPolicy::Grant,
            container: RequestPolicy::Grant,
            held: None,
            outstanding: VecDeque::new(),
            signals: VecDeque::new(),
            requests: Vec::new(),
        }
    }

    /// Platform with no fullscreen API at all
    #[inline]
    #[must_use]
    pub fn without_fullscreen() -> Self {
        Self::new([])
    }

    /// With request policy for the frame
    #[inline]
    #[must_use]
    pub fn with_frame_policy(mut self, policy: RequestPolicy) -> Self {
        self.frame = policy;
        self
    }

    /// With request policy for the container
    #[inline]
    #[must_use]
    pub fn with_container_policy(mut self, policy: RequestPolicy) -> Self {
        self.container = policy;
        self
    }

    /// Surface currently holding fullscreen
    #[inline]
    #[must_use]
    pub fn held(&self) -> Option<Surface> {
        self.held
    }

    /// Every request that reached a vendor entry point
    #[inline]
    #[must_use]
    pub fn requests(&self) -> &[(Vendor, Surface)] {
        &self.requests
    }

    /// Settle outstanding requests and pop the next queued signal
    pub fn next_signal(&mut self) -> Option<PlatformSignal> {
        while let Some((vendor, surface)) = self.outstanding.pop_front() {
            match self.policy(surface) {
                RequestPolicy::Grant => {
                    self.held = Some(surface);
                    self.signals.push_back(PlatformSignal::FullscreenChanged(vendor));
                }
                _ => self.signals.push_back(PlatformSignal::RequestRejected(surface)),
            }
        }
        self.signals.pop_front()
    }

    /// User entered fullscreen through a browser hotkey
    pub fn user_enter(&mut self) {
        if let Some(&vendor) = self.vendors.first() {
            self.held = Some(Surface::Frame);
            self.signals.push_back(PlatformSignal::FullscreenChanged(vendor));
        }
    }

    /// User left fullscreen through browser chrome
    pub fn user_exit(&mut self) {
        if let (Some(_), Some(&vendor)) = (self.held.take(), self.vendors.first()) {
            self.signals.push_back(PlatformSignal::FullscreenChanged(vendor));
        }
    }

    fn policy(&self, surface: Surface) -> RequestPolicy {
        match surface {
            Surface::Frame => self.frame,
            Surface::Container => self.container,
        }
    }
}

impl VendorEntryPoints for HeadlessPlatform {
    fn fullscreen_element(&self, vendor: Vendor) -> Option<bool> {
        self.vendors.contains(&vendor).then_some(self.held.is_some())
    }

    fn request(&mut self, vendor: Vendor, surface: Surface) -> Option<RequestOutcome> {
        if !self.vendors.contains(&vendor) {
            return None;
        }
        let outcome = match self.policy(surface) {
            RequestPolicy::Missing => return None,
            RequestPolicy::Refuse => RequestOutcome::Rejected,
            RequestPolicy::Grant | RequestPolicy::Deny => {
                self.outstanding.push_back((vendor, surface));
                RequestOutcome::Pending
            }
        };
        self.requests.push((vendor, surface));
        Some(outcome)
    }

    fn exit(&mut self, vendor: Vendor) -> bool {
        if !self.vendors.contains(&vendor) {
            return false;
        }
        if self.held.take().is_some() {
            self.signals.push_back(PlatformSignal::FullscreenChanged(vendor));
        }
        true
    }
}

/// Event fed to a simulated viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewerEvent {
    /// Native fullscreen button
    TrueFullscreen,
    /// Expanded view button
    ExpandedView,
    /// Legacy fullscreen button
    LegacyToggle,
    /// Escape key
    Escape,
    /// Double tap on the frame
    DoubleTap,
    /// Browser hotkey entered fullscreen
    PlatformEnter,
    /// Browser chrome left fullscreen
    PlatformExit,
}

impl ViewerEvent {
    /// Every event, in CLI name order
    pub const ALL: [ViewerEvent; 7] = [
        ViewerEvent::TrueFullscreen,
        ViewerEvent::ExpandedView,
        ViewerEvent::LegacyToggle,
        ViewerEvent::Escape,
        ViewerEvent::DoubleTap,
        ViewerEvent::PlatformEnter,
        ViewerEvent::PlatformExit,
    ];

    /// Short name used on the command line
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ViewerEvent::TrueFullscreen => "fullscreen",
            ViewerEvent::ExpandedView => "expand",
            ViewerEvent::LegacyToggle => "legacy",
            ViewerEvent::Escape => "escape",
            ViewerEvent::DoubleTap => "double-tap",
            ViewerEvent::PlatformEnter => "platform-enter",
            ViewerEvent::PlatformExit => "platform-exit",
        }
    }
}

impl Display for ViewerEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown event name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown viewer event: '{0}'")]
pub struct UnknownEvent(pub String);

impl FromStr for ViewerEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewerEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// Viewer state after one event and all platform signals it caused
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStep {
    /// Event applied
    pub event: ViewerEvent,
    /// Mode once the platform settled
    pub mode: ViewerMode,
    /// Button faces once the platform settled
    pub affordances: Affordances,
    /// Whether native fullscreen is held once the platform settled
    pub native_held: bool,
}

/// Broken invariant found during a simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Index of the event after which the invariant broke
    pub step: usize,
    /// What went wrong
    pub message: String,
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Per-event outcome
    pub steps: Vec<SimulationStep>,
    /// Invariant violations
    pub violations: Vec<Violation>,
}

impl SimulationReport {
    /// Check if no invariant was violated
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Final mode, or `Normal` for an empty run
    #[must_use]
    pub fn final_mode(&self) -> ViewerMode {
        self.steps.last().map_or(ViewerMode::Normal, |step| step.mode)
    }

    /// Human-readable report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut out = String::from("Viewer Simulation Report\n========================\n");
        for (index, step) in self.steps.iter().enumerate() {
            out.push_str(&format!(
                "{index:>3}  {:<15} {:?} (native held: {})\n",
                step.event.name(),
                step.mode,
                step.native_held
            ));
        }
        if self.passed() {
            out.push_str("\nInvariants: PASS\n");
        } else {
            out.push_str("\nInvariants: FAIL\n");
            for violation in &self.violations {
                out.push_str(&format!("  step {}: {}\n", violation.step, violation.message));
            }
        }
        out
    }
}

/// Apply `events` to a fresh viewer on `platform`
///
/// After each event every queued platform signal is delivered, then the
/// settled state is checked. The viewer must never claim native fullscreen
/// the platform does not hold. When a change notification was delivered, the
/// viewer must also be in native fullscreen whenever the platform holds it.
pub fn run_simulation(
    device: DeviceProfile,
    platform: HeadlessPlatform,
    events: &[ViewerEvent],
) -> SimulationReport {
    let mut probe = FullscreenProbe::new(platform);
    let mut state = ViewerState::new(device);
    let mut steps = Vec::with_capacity(events.len());
    let mut violations = Vec::new();

    for (index, &event) in events.iter().enumerate() {
        match event {
            ViewerEvent::TrueFullscreen => {
                state.request_true_fullscreen(&mut probe);
            }
            ViewerEvent::ExpandedView => {
                state.request_expanded_view();
            }
            ViewerEvent::LegacyToggle => {
                state.request_legacy_toggle(&mut probe);
            }
            ViewerEvent::Escape => {
                state.escape_pressed();
            }
            ViewerEvent::DoubleTap => {
                state.double_tap(&mut probe);
            }
            ViewerEvent::PlatformEnter => probe.entry_points_mut().user_enter(),
            ViewerEvent::PlatformExit => probe.entry_points_mut().user_exit(),
        }

        let mut notified = false;
        while let Some(signal) = probe.entry_points_mut().next_signal() {
            match signal {
                PlatformSignal::FullscreenChanged(_) => {
                    notified = true;
                    state.platform_fullscreen_changed(&probe);
                }
                PlatformSignal::RequestRejected(surface) => {
                    state.fullscreen_request_rejected(surface, &mut probe);
                }
            }
        }

        let native_held = probe.is_active();
        let mode = state.mode();
        let consistent = match mode {
            ViewerMode::NativeFullscreen => native_held,
            ViewerMode::Normal | ViewerMode::MobileExpanded => !(notified && native_held),
        };
        if !consistent {
            violations.push(Violation {
                step: index,
                message: format!("viewer in {mode:?} while native fullscreen held = {native_held}"),
            });
        }
        steps.push(SimulationStep {
            event,
            mode,
            affordances: state.current_affordances(),
            native_held,
        });
    }

    SimulationReport { steps, violations }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop(platform: HeadlessPlatform, events: &[ViewerEvent]) -> SimulationReport {
        run_simulation(DeviceProfile::desktop(), platform, events)
    }

    #[test]
    fn granted_request_reaches_native() {
        let report = desktop(HeadlessPlatform::new([Vendor::Standard]), &[ViewerEvent::TrueFullscreen]);
        assert!(report.passed());
        assert_eq!(report.final_mode(), ViewerMode::NativeFullscreen);
    }

    #[test]
    fn toggle_twice_returns_to_normal() {
        let report = desktop(
            HeadlessPlatform::new([Vendor::Webkit]),
            &[ViewerEvent::TrueFullscreen, ViewerEvent::TrueFullscreen],
        );
        assert!(report.passed());
        assert_eq!(report.final_mode(), ViewerMode::Normal);
        assert!(!report.steps[1].native_held);
    }

    #[test]
    fn denied_frame_falls_back_to_container() {
        let platform = HeadlessPlatform::new([Vendor::Standard]).with_frame_policy(RequestPolicy::Deny);
        let mut probe = FullscreenProbe::new(platform);
        let mut state = ViewerState::new(DeviceProfile::desktop());
        state.request_true_fullscreen(&mut probe);

        let signal = probe.entry_points_mut().next_signal();
        assert_eq!(signal, Some(PlatformSignal::RequestRejected(Surface::Frame)));
        state.fullscreen_request_rejected(Surface::Frame, &mut probe);
        assert_eq!(state.pending_request(), Some(Surface::Container));

        assert!(matches!(
            probe.entry_points_mut().next_signal(),
            Some(PlatformSignal::FullscreenChanged(Vendor::Standard))
        ));
        state.platform_fullscreen_changed(&probe);
        assert_eq!(state.mode(), ViewerMode::NativeFullscreen);
        assert_eq!(probe.entry_points().held(), Some(Surface::Container));
    }

    #[test]
    fn no_api_means_expanded_view() {
        let report = desktop(HeadlessPlatform::without_fullscreen(), &[ViewerEvent::TrueFullscreen]);
        assert_eq!(report.final_mode(), ViewerMode::MobileExpanded);
        assert!(report.passed());
    }

    #[test]
    fn browser_exit_is_picked_up() {
        let report = desktop(
            HeadlessPlatform::new([Vendor::Moz]),
            &[ViewerEvent::TrueFullscreen, ViewerEvent::PlatformExit],
        );
        assert!(report.passed());
        assert_eq!(report.final_mode(), ViewerMode::Normal);
    }

    #[test]
    fn hotkey_fullscreen_without_request() {
        let report = desktop(HeadlessPlatform::new([Vendor::Standard]), &[ViewerEvent::PlatformEnter]);
        assert_eq!(report.final_mode(), ViewerMode::NativeFullscreen);
        assert!(report.passed());
    }

    #[test]
    fn event_names_round_trip() {
        for event in ViewerEvent::ALL {
            assert_eq!(event.name().parse::<ViewerEvent>(), Ok(event));
        }
        assert!("jump".parse::<ViewerEvent>().is_err());
    }

    #[test]
    fn text_report_mentions_outcome() {
        let report = desktop(HeadlessPlatform::new([Vendor::Standard]), &[ViewerEvent::ExpandedView]);
        let text = report.generate_text();
        assert!(text.contains("expand"));
        assert!(text.contains("Invariants: PASS"));
    }
}
