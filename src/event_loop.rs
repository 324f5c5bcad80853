use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, Event};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};

use crate::app::App;
use crate::handlers::keyboard::handle_key_event;
use crate::handlers::mouse::handle_mouse_event;
use crate::ui::help_bar::draw_help_bar;
use crate::ui::input_line::InputLine;
use crate::ui::layout::create_layout;
use crate::ui::scrollback::ScrollbackPane;
use crate::ui::tabs::SessionTabs;
use crate::ui::toast_widget::ToastWidget;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Merge results from any command that finished since the last tick.
        app.drain_exec_replies();

        // Update toast manager (remove expired)
        app.toast_manager.update();

        // Draw UI
        terminal.draw(|f| draw_ui(f, app))?;

        // Handle events with a timeout so executor replies keep flowing
        if poll(Duration::from_millis(50))? {
            match read()? {
                Event::Key(key) => handle_key_event(app, key),
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                Event::Resize(..) => {
                    // Layout is recomputed on the next draw; a stale
                    // selection would map to the wrong cells.
                    app.clear_selection();
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw_ui(f: &mut Frame, app: &mut App) {
    let (tabs_area, scroll_area, input_area, help_area) = create_layout(f.area());

    // Cache the pane's inner area (area minus 1px border) for mouse
    // coordinate mapping and scroll clamping
    let inner = Rect {
        x: scroll_area.x + 1,
        y: scroll_area.y + 1,
        width: scroll_area.width.saturating_sub(2),
        height: scroll_area.height.saturating_sub(2),
    };
    app.scrollback_area = Some(inner);
    app.refresh_scrollback();

    let busy = app.busy();
    let session_name = app
        .active_session()
        .map(|s| s.name.clone())
        .unwrap_or_default();

    let tabs = SessionTabs::new(app.store.sessions(), &app.active_session_id);
    f.render_widget(tabs, tabs_area);

    let pane = ScrollbackPane::new(
        app.scrollback(),
        &session_name,
        app.scroll_offset,
        app.text_selection.as_ref(),
        busy,
    );
    f.render_widget(pane, scroll_area);

    InputLine::new(&app.input, busy).render(f, input_area);

    draw_help_bar(f, help_area, app);

    // Draw toasts (overlay on top of everything)
    let toasts = app.toast_manager.visible();
    if !toasts.is_empty() {
        ToastWidget::new(&toasts).render(f, f.area());
    }
}
