/// The page's render surface. Every method defaults to a no-op, so a
/// view that lacks a given target simply ignores that update instead
/// of failing the feature.
pub trait PageView: Send {
    fn set_price(&mut self, _text: &str) {}

    fn set_change(&mut self, _text: &str) {}

    fn set_direction(&mut self, _positive: bool) {}

    fn set_badge(&mut self, _text: &str) {}

    fn set_submitting(&mut self, _submitting: bool) {}

    fn show_alert(&mut self, _text: &str) {}

    fn show_success(&mut self) {}

    fn hide_success(&mut self) {}

    fn reset_form(&mut self) {}
}
