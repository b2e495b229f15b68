//! crates/cinesphere_core/src/rating.rs
//!
//! The star rating selector. A fixed-width control is split into `ZONES`
//! equal zones; hovering previews a value and clicking commits it to the
//! shared `RatingSelection` that the mounted form reads on submit.

use std::sync::Arc;

use tokio::sync::watch;

/// Number of equal-width pointer zones across the control.
pub const ZONES: u8 = 50;
/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 10.0;

/// Rating value for zone `zone`, clamped to the last zone.
pub fn zone_value(zone: u8) -> f64 {
    f64::from(zone.min(ZONES)) * MAX_RATING / f64::from(ZONES)
}

/// The zone whose value is closest to `value`. Out-of-range input is clamped.
pub fn zone_for_value(value: f64) -> u8 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let scaled = (value.min(MAX_RATING) * f64::from(ZONES) / MAX_RATING).round();
    // scaled is within 0..=ZONES here
    scaled as u8
}

/// Formats a rating the way the readout shows it, e.g. `7.4`.
pub fn format_rating(value: f64) -> String {
    format!("{:.1}", value)
}

//=========================================================================================
// Shared committed value
//=========================================================================================

/// The committed rating shared between the selector and the open form.
#[derive(Debug, Clone)]
pub struct RatingSelection {
    tx: Arc<watch::Sender<f64>>,
}

impl Default for RatingSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingSelection {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0.0);
        Self { tx: Arc::new(tx) }
    }

    /// Replaces any prior commitment.
    pub fn commit(&self, value: f64) {
        self.tx.send_replace(value.clamp(0.0, MAX_RATING));
    }

    pub fn value(&self) -> f64 {
        *self.tx.borrow()
    }

    pub fn reset(&self) {
        self.commit(0.0);
    }

    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.tx.subscribe()
    }
}

//=========================================================================================
// Selector state machine
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerState {
    Idle,
    Hovering(u8),
}

/// Pointer-driven selector. Hover state is local; clicks write through to the
/// shared selection without touching the hover state.
#[derive(Debug, Clone)]
pub struct RatingSelector {
    state: PointerState,
    selection: RatingSelection,
}

impl RatingSelector {
    /// Mounts a selector over `selection`, clearing any earlier commitment.
    pub fn mount(selection: RatingSelection) -> Self {
        selection.reset();
        Self::attach(selection)
    }

    /// Attaches to `selection` keeping its current value (used when a form
    /// seeds the selection from an existing movie).
    pub fn attach(selection: RatingSelection) -> Self {
        Self { state: PointerState::Idle, selection }
    }

    /// Maps a pointer x-offset inside a control of `width` to a zone.
    pub fn zone_at(x: f64, width: f64) -> u8 {
        if width <= 0.0 || !x.is_finite() || x <= 0.0 {
            return 0;
        }
        let zone = (x / width * f64::from(ZONES)).floor();
        if zone >= f64::from(ZONES) {
            ZONES
        } else {
            zone as u8
        }
    }

    pub fn pointer_enter(&mut self, zone: u8) {
        self.state = PointerState::Hovering(zone.min(ZONES));
    }

    pub fn pointer_leave(&mut self) {
        self.state = PointerState::Idle;
    }

    pub fn click(&self, zone: u8) {
        self.selection.commit(zone_value(zone));
    }

    pub fn preview(&self) -> f64 {
        match self.state {
            PointerState::Idle => 0.0,
            PointerState::Hovering(zone) => zone_value(zone),
        }
    }

    pub fn is_hovering(&self) -> bool {
        matches!(self.state, PointerState::Hovering(_))
    }

    /// Preview while it is non-zero, otherwise the committed value.
    pub fn display_value(&self) -> f64 {
        let preview = self.preview();
        if preview != 0.0 {
            preview
        } else {
            self.selection.value()
        }
    }

    /// Width fraction of the filled stars, in `0.0..=1.0`.
    pub fn fill_fraction(&self) -> f64 {
        self.display_value() / MAX_RATING
    }

    pub fn readout(&self) -> String {
        format_rating(self.display_value())
    }

    pub fn selection(&self) -> &RatingSelection {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_zone_previews_a_fifth_of_a_point() {
        let mut selector = RatingSelector::mount(RatingSelection::new());
        for zone in 0..=ZONES {
            selector.pointer_enter(zone);
            let expected = f64::from(zone) * 0.2;
            assert!((selector.preview() - expected).abs() < 1e-9, "zone {zone}");
            assert!((selector.fill_fraction() - selector.preview() / 10.0).abs() < 1e-12);
        }
    }

    #[test]
    fn readout_matches_fill_to_one_decimal() {
        let mut selector = RatingSelector::mount(RatingSelection::new());
        for zone in 0..=ZONES {
            selector.pointer_enter(zone);
            let from_fill = format_rating(selector.fill_fraction() * MAX_RATING);
            assert_eq!(selector.readout(), from_fill);
        }
        selector.pointer_enter(37);
        assert_eq!(selector.readout(), "7.4");
    }

    #[test]
    fn leaving_reveals_committed_value_not_hover() {
        let selection = RatingSelection::new();
        let mut selector = RatingSelector::mount(selection.clone());

        selector.pointer_enter(40);
        selector.click(40);
        selector.pointer_enter(12);
        assert!((selector.display_value() - 2.4).abs() < 1e-9);

        selector.pointer_leave();
        assert_eq!(selector.preview(), 0.0);
        assert!(!selector.is_hovering());
        assert!((selector.display_value() - 8.0).abs() < 1e-9);
        assert!((selection.value() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn click_replaces_prior_commitment_without_changing_hover() {
        let selection = RatingSelection::new();
        let mut selector = RatingSelector::mount(selection.clone());
        selector.pointer_enter(10);
        selector.click(10);
        selector.click(45);
        assert!(selector.is_hovering());
        assert!((selector.preview() - 2.0).abs() < 1e-9);
        assert!((selection.value() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn mount_resets_but_attach_keeps_selection() {
        let selection = RatingSelection::new();
        selection.commit(6.4);
        let attached = RatingSelector::attach(selection.clone());
        assert_eq!(attached.readout(), "6.4");

        let mounted = RatingSelector::mount(selection.clone());
        assert_eq!(mounted.display_value(), 0.0);
        assert_eq!(selection.value(), 0.0);
    }

    #[test]
    fn pointer_position_maps_to_zone() {
        assert_eq!(RatingSelector::zone_at(0.0, 160.0), 0);
        assert_eq!(RatingSelector::zone_at(3.3, 160.0), 1);
        assert_eq!(RatingSelector::zone_at(80.0, 160.0), 25);
        assert_eq!(RatingSelector::zone_at(159.9, 160.0), 49);
        assert_eq!(RatingSelector::zone_at(400.0, 160.0), ZONES);
        assert_eq!(RatingSelector::zone_at(10.0, 0.0), 0);
    }

    #[test]
    fn typed_values_snap_to_nearest_zone() {
        assert_eq!(zone_for_value(7.31), 37);
        assert_eq!(zone_for_value(7.4), 37);
        assert_eq!(zone_for_value(-1.0), 0);
        assert_eq!(zone_for_value(42.0), ZONES);
        assert_eq!(zone_for_value(f64::NAN), 0);
    }

    #[test]
    fn subscribers_observe_commits() {
        let selection = RatingSelection::new();
        let rx = selection.subscribe();
        selection.commit(5.2);
        assert!((*rx.borrow() - 5.2).abs() < 1e-9);
        selection.commit(11.0);
        assert_eq!(selection.value(), MAX_RATING);
    }
}
