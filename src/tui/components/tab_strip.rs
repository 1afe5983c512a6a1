use crate::app::{AppState, TabRegion};
use crate::models::{Project, SubTab};
use crate::tui::components::sidebar::truncate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const MAX_NAME: usize = 24;
const NEW_TAB_LABEL: &str = " + ";

pub struct StripLayout {
    pub regions: Vec<TabRegion>,
    pub new_tab_button: Option<(u16, u16)>,
}

/// Width of a tab cell: " name × "
fn tab_width(name: &str) -> u16 {
    (name.chars().count() + 4) as u16
}

/// Draw the sub-tab strip of the active project. While a drag is in flight
/// the dragged order is shown instead of the committed one.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) -> StripLayout {
    let theme = state.theme;
    let mut layout = StripLayout {
        regions: Vec::new(),
        new_tab_button: None,
    };

    let Some(project) = state.workspace.active_project() else {
        return layout;
    };

    let mut spans = Vec::new();
    let mut x = area.x;
    let right = area.x + area.width;

    if !project.is_initialized() {
        // Placeholders have no terminal yet; show them dimmed without hit regions
        for saved in project.saved_tabs() {
            let label = format!(" {} ", truncate(&saved.name, MAX_NAME));
            x += label.chars().count() as u16;
            spans.push(Span::styled(label, Style::default().fg(theme.muted())));
        }
    } else {
        let active_id = project.active_subtab().map(|t| t.id);
        let dragged = state.ui.dragged_tab();
        for tab in ordered_tabs(project, state.ui.tab_drag.visual_order()) {
            let name = truncate(&tab.name, MAX_NAME);
            let width = tab_width(&name);
            if x + width > right {
                break;
            }

            let mut style = if Some(tab.id) == active_id {
                Style::default()
                    .fg(theme.fg())
                    .bg(theme.selection_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted())
            };
            if Some(tab.id) == dragged {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if !tab.has_backend() {
                style = style.fg(theme.error());
            }

            spans.push(Span::styled(format!(" {} ", name), style));
            spans.push(Span::styled("×", style.fg(theme.muted())));
            spans.push(Span::styled(" ", style));
            layout.regions.push(TabRegion {
                id: tab.id,
                x,
                width,
                close_x: x + width - 2,
            });
            x += width;
        }
    }

    let button_width = NEW_TAB_LABEL.len() as u16;
    if x + button_width <= right {
        spans.push(Span::styled(NEW_TAB_LABEL, Style::default().fg(theme.accent())));
        layout.new_tab_button = Some((x, button_width));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
    layout
}

fn ordered_tabs(project: &Project, visual: Option<Vec<crate::models::TerminalId>>) -> Vec<&SubTab> {
    let tabs = project.tabs();
    match visual {
        Some(order) => {
            let mut ordered: Vec<&SubTab> = order
                .iter()
                .filter_map(|id| tabs.iter().find(|t| t.id == *id))
                .collect();
            // A tab created mid-drag goes at the end
            ordered.extend(tabs.iter().filter(|t| !order.contains(&t.id)));
            ordered
        }
        None => tabs.iter().collect(),
    }
}
