#![forbid(unsafe_code)]

//! Moving-boxes driver: two panes, a field, a sine-path animation
//! worker, a scroll worker, and a WINCH-bound full repaint.

use std::thread;
use std::time::Duration;

use termpaint::prelude::*;

const MARQUEE_WIDTH: u16 = 20;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let info = CrosstermInfo;
    let root = Root::new(&info)?;
    let root_id = root.root_id();

    let status = root.attach(
        root_id,
        Node::text_pane(0, 1, 15, 10)
            .with_id("status")
            .with_background(Color::Green)
            .with_border_color(Color::Blue),
    );
    let marquee = root.attach(
        root_id,
        Node::text_pane(5, 8, MARQUEE_WIDTH, 9)
            .with_id("marquee")
            .with_background(Color::White)
            .with_foreground(Color::Black),
    );
    let field = root.attach(
        root_id,
        Node::text_field(2, 18, 24).with_foreground(Color::BrightWhite),
    );

    root.with_tree_mut(|tree| {
        let long_text =
            "This is some long text right here, and it just keeps on going!\n".repeat(10);
        tree.node_mut(marquee).set_text(long_text);
        tree.node_mut(field).set_text("type here");
        let _ = tree.node_mut(field).set_cursor(0);
    });

    {
        let mut term = AnsiWriter::stdout();
        root.with_tree(|tree| tree.repaint(tree.root(), &mut term))?;
    }

    let mut notifier = SigwinchNotifier::new();
    root.bind_resize(&mut notifier, CrosstermInfo, AnsiWriter::stdout)?;

    // Bounce the marquee along a sine path
    let mover = root.clone();
    thread::spawn(move || {
        for t in 0..400u32 {
            let mut term = AnsiWriter::stdout();
            let _ = mover.with_tree_mut(|tree| {
                let span = tree
                    .node(tree.root())
                    .width()
                    .saturating_sub(MARQUEE_WIDTH + 1);
                let x = (f64::from(t) / 20.0).sin().abs() * f64::from(span);
                tree.node_mut(marquee).move_to(x as u16, 8);
                tree.repaint(tree.root(), &mut term)
            });
            thread::sleep(Duration::from_millis(100));
        }
    });

    // Scroll the marquee text
    let scroller = root.clone();
    thread::spawn(move || {
        for _ in 0..100 {
            let mut term = AnsiWriter::stdout();
            let _ = scroller.with_tree_mut(|tree| {
                let offset = tree.node(marquee).scroll_y().unwrap_or(0);
                tree.node_mut(marquee).set_scroll_y(offset + 1);
                tree.repaint(marquee, &mut term)
            });
            thread::sleep(Duration::from_millis(300));
        }
    });

    for t in 0..50u32 {
        let mut term = AnsiWriter::stdout();
        root.with_tree_mut(|tree| {
            let (width, height) = {
                let node = tree.node(tree.root());
                (node.width(), node.height())
            };
            tree.node_mut(status)
                .set_text(format!("Width: {width}\nHeight: {height}\nTime: {t}"));
            tree.repaint(status, &mut term)
        })?;
        thread::sleep(Duration::from_secs(1));
    }

    let mut term = AnsiWriter::stdout();
    let rows = info.rows()?;
    term.move_cursor_to(0, rows.saturating_sub(1))?;
    term.flush()?;
    Ok(())
}
