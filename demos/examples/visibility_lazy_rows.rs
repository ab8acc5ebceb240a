// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy loading rows of a scrolled list.
//!
//! One evaluator per row waits for the row's center to enter the viewport, then marks the row
//! loaded and stops observing it.
//!
//! Run:
//! - `RUST_LOG=understory_visibility=trace cargo run -p understory_demos --example visibility_lazy_rows`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_visibility::condition::Condition;
use understory_visibility::evaluator::{Outcome, VisibilityEvaluator, callback};
use understory_visibility::host::{ChangeStream, GeometrySource, ViewportSource};

const ROW_H: f64 = 120.0;
const WIDTH: f64 = 400.0;
const ROWS: usize = 20;

/// Scroll container shared by every row's evaluator.
struct ListHost {
    scroll_y: Rc<Cell<f64>>,
    viewport: Size,
    listeners: Rc<Cell<usize>>,
}

impl GeometrySource<usize> for ListHost {
    fn bounding_rect(&self, row: &usize) -> Option<Rect> {
        let y0 = *row as f64 * ROW_H - self.scroll_y.get();
        Some(Rect::new(0.0, y0, WIDTH, y0 + ROW_H))
    }
}

impl ViewportSource for ListHost {
    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

impl ChangeStream for ListHost {
    type Event = f64;
    type Subscription = ();

    fn subscribe(&mut self) {
        self.listeners.set(self.listeners.get() + 1);
    }

    fn unsubscribe(&mut self, _subscription: ()) {
        self.listeners.set(self.listeners.get() - 1);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let scroll_y = Rc::new(Cell::new(0.0));
    let listeners = Rc::new(Cell::new(0));
    let loaded = Rc::new(RefCell::new(Vec::new()));
    let condition = Condition::parse("centerIsVisible: true");

    let mut rows: Vec<_> = (0..ROWS)
        .map(|row| {
            let host = ListHost {
                scroll_y: scroll_y.clone(),
                viewport: Size::new(WIDTH, 500.0),
                listeners: listeners.clone(),
            };
            let loaded = loaded.clone();
            let mut eval = VisibilityEvaluator::bound(host, row);
            eval.configure(
                condition,
                Some(callback(move |row: &usize, _, _, _| {
                    loaded.borrow_mut().push(*row);
                    Outcome::Stop
                })),
                None,
                false,
            );
            eval
        })
        .collect();

    println!("initially loaded: {:?}", loaded.borrow());

    for target in [200.0, 700.0, 1500.0, 900.0] {
        scroll_y.set(target);
        for eval in rows.iter_mut().filter(|e| e.is_attached()) {
            eval.handle_change(&target);
        }
        println!(
            "scroll={target:.0} -> loaded {:?}, {} rows still observed",
            loaded.borrow(),
            listeners.get()
        );
    }
}
