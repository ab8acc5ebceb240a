// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Status changes of one element while scrolling past it.
//!
//! Uses `Condition::All`, so every change of any status field is reported once.
//!
//! Run:
//! - `cargo run -p understory_demos --example visibility_scroll`

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_visibility::evaluator::{Evaluation, Outcome, VisibilityEvaluator, callback};
use understory_visibility::host::{ChangeStream, GeometrySource, ViewportSource};
use understory_visibility::types::Visibility;

struct Window {
    scroll: (f64, f64),
    size: Size,
}

impl GeometrySource<Rect> for Window {
    fn bounding_rect(&self, element: &Rect) -> Option<Rect> {
        let (dx, dy) = self.scroll;
        Some(Rect::new(
            element.x0 - dx,
            element.y0 - dy,
            element.x1 - dx,
            element.y1 - dy,
        ))
    }
}

impl ViewportSource for Window {
    fn viewport_size(&self) -> Size {
        self.size
    }
}

impl ChangeStream for Window {
    type Event = (f64, f64);
    type Subscription = ();

    fn subscribe(&mut self) {}

    fn unsubscribe(&mut self, _subscription: ()) {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A banner larger than the window in both directions.
    let banner = Rect::new(100.0, 700.0, 1000.0, 1500.0);
    let window = Window {
        scroll: (0.0, 0.0),
        size: Size::new(800.0, 600.0),
    };

    let mut eval = VisibilityEvaluator::bound(window, banner);
    eval.configure_always(Some(callback(|_: &Rect, event, status, _| {
        println!(
            "  scroll={:?} visibility={} edges={:?} center={}",
            event, status.visibility.name(), status.edges, status.center_is_visible
        );
        Outcome::Continue
    })));

    for scroll in [
        (0.0, 0.0),
        (0.0, 300.0),
        (200.0, 800.0),
        (200.0, 1000.0),
        (150.0, 800.0),
        (0.0, 2000.0),
    ] {
        eval.host_mut().scroll = scroll;
        if eval.handle_change(&scroll) == Evaluation::Quiet {
            println!("  scroll={scroll:?} unchanged");
        }
    }

    assert_eq!(
        eval.status().map(|s| s.visibility),
        Some(Visibility::Hidden)
    );
}
