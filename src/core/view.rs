//! Rendering seam between the calculation logic and the terminal.

use crate::core::rate::RateState;
use crate::core::worksheet::{RowEntry, RowOutput};

/// Everything the acquisition and calculator routines need from a rendering
/// surface. The console implementation lives in `cli::console`; tests drive
/// the routines with a recording implementation instead.
pub trait View {
    /// Renders the raw and buffered rate displays. Either value may still be
    /// unset, in which case the display shows the empty marker.
    fn render_rates(&mut self, rates: &RateState);

    /// Renders the worksheet table. `outputs` has one entry per row in
    /// `entries`, in order.
    fn render_worksheet(&mut self, entries: &[RowEntry], outputs: &[RowOutput]);

    /// Shows a transient notification to the user.
    fn notify(&mut self, message: &str);
}
