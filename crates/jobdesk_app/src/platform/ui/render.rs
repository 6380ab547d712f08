use jobdesk_core::status::Rgb;
use jobdesk_core::{
    AppViewModel, FilesView, FormView, JobRowView, StatusView, ToolbarButtonView, UploadMode,
    ViewMode, ViewerView, NO_JOBS_PLACEHOLDER,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use super::constants::{
    ALERT_HEIGHT, ALERT_WIDTH, FILES_HEADER_HEIGHT, VIEWER_PERCENT_X, VIEWER_PERCENT_Y,
};
use super::layout::{self, button_slots, table_rows};
use super::HitMap;

const SELECTED: Style = Style::new().add_modifier(Modifier::REVERSED);
const DISABLED: Style = Style::new().fg(Color::DarkGray);
const MUTED: Style = Style::new().fg(Color::Gray);

/// Draws one frame and returns where its clickable parts ended up.
pub fn render(frame: &mut Frame, view: &AppViewModel) -> HitMap {
    let mut hits = HitMap::default();
    let areas = layout::areas(frame.area());

    draw_toolbar(frame, areas.toolbar, &view.toolbar, &mut hits);

    if view.loading {
        frame.render_widget(
            Paragraph::new("Loading...").block(Block::bordered().title(" Jobs ")),
            areas.body,
        );
    } else {
        match view.mode {
            ViewMode::List => draw_jobs(frame, areas.body, &view.jobs, &mut hits),
            ViewMode::Files => {
                if let Some(files) = &view.files {
                    draw_files(frame, areas.body, files, &mut hits);
                }
            }
            ViewMode::Add => {
                if let Some(form) = &view.form {
                    draw_form(frame, areas.body, form);
                }
            }
        }
    }

    draw_status_line(frame, areas.status, view);

    if let Some(viewer) = &view.viewer {
        hits.viewer = Some(draw_viewer(frame, areas.body, viewer));
    }
    if let Some(alert) = &view.alert {
        draw_alert(frame, frame.area(), alert);
    }
    hits
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn status_cell(status: &StatusView) -> Cell<'static> {
    Cell::from(status.label.clone()).style(Style::new().fg(color(status.color)))
}

fn draw_toolbar(frame: &mut Frame, area: Rect, buttons: &[ToolbarButtonView], hits: &mut HitMap) {
    let block = Block::bordered();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let labels: Vec<String> = buttons
        .iter()
        .map(|button| format!(" {} [{}] ", button.label, button.hint))
        .collect();
    let widths: Vec<u16> = labels
        .iter()
        .map(|label| u16::try_from(label.chars().count()).unwrap_or(u16::MAX))
        .collect();

    for ((button, label), slot) in buttons.iter().zip(labels).zip(button_slots(inner, &widths)) {
        if slot.width == 0 {
            continue;
        }
        let style = if button.enabled {
            Style::new().add_modifier(Modifier::BOLD)
        } else {
            DISABLED
        };
        frame.render_widget(Paragraph::new(Span::styled(label, style)), slot);
        hits.toolbar.push((slot, button.command));
    }
}

fn job_cells(row: &JobRowView) -> Vec<Cell<'static>> {
    vec![
        Cell::from(format!("#{}", row.job_id)),
        status_cell(&row.status),
        Cell::from(row.created_at.clone()),
        Cell::from(row.user.clone()),
        Cell::from(row.folder_in.clone()),
        Cell::from(row.folder_out.clone()),
        Cell::from(row.progress.clone()),
    ]
}

fn draw_jobs(frame: &mut Frame, area: Rect, jobs: &[JobRowView], hits: &mut HitMap) {
    let block = Block::bordered().title(" Jobs ");
    if jobs.is_empty() {
        frame.render_widget(
            Paragraph::new(NO_JOBS_PLACEHOLDER).style(MUTED).block(block),
            area,
        );
        return;
    }

    let header = Row::new(["ID", "Status", "Created", "User", "Input", "Output", "Files"])
        .style(Style::new().add_modifier(Modifier::BOLD));
    let rows = jobs.iter().map(|row| Row::new(job_cells(row)));
    let widths = [
        Constraint::Length(6),
        Constraint::Length(11),
        Constraint::Length(23),
        Constraint::Length(18),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(SELECTED);

    let mut state = TableState::default().with_selected(jobs.iter().position(|row| row.selected));
    frame.render_stateful_widget(table, area, &mut state);

    hits.jobs = table_rows(area, state.offset(), jobs.len())
        .into_iter()
        .map(|(index, rect)| (rect, jobs[index].job_id))
        .collect();
}

fn draw_files(frame: &mut Frame, area: Rect, files: &FilesView, hits: &mut HitMap) {
    let [header_area, table_area] =
        Layout::vertical([Constraint::Length(FILES_HEADER_HEIGHT), Constraint::Min(0)]).areas(area);

    let header_block = Block::bordered().title(format!(" {} ", files.title));
    let header_lines = match &files.header {
        Some(job) => vec![
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(job.status.label.clone(), Style::new().fg(color(job.status.color))),
                Span::raw(format!("   Created: {}   User: {}", job.created_at, job.user)),
            ]),
            Line::from(format!("{} -> {}", job.folder_in, job.folder_out)),
        ],
        None => vec![Line::styled("Loading job...", MUTED)],
    };
    frame.render_widget(Paragraph::new(header_lines).block(header_block), header_area);

    let block = Block::bordered().title(" Files ");
    if let Some(placeholder) = &files.placeholder {
        frame.render_widget(
            Paragraph::new(placeholder.as_str()).style(MUTED).block(block),
            table_area,
        );
        return;
    }

    let header = Row::new(["Filename", "Path", "Status", "Created", "Processed"])
        .style(Style::new().add_modifier(Modifier::BOLD));
    let rows = files.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.filename.clone()),
            Cell::from(row.filepath.clone()),
            status_cell(&row.status),
            Cell::from(row.created_at.clone()),
            Cell::from(row.processed_at.clone()),
        ])
    });
    let widths = [
        Constraint::Fill(1),
        Constraint::Fill(2),
        Constraint::Length(11),
        Constraint::Length(23),
        Constraint::Length(23),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(SELECTED);

    let mut state =
        TableState::default().with_selected(files.rows.iter().position(|row| row.selected));
    frame.render_stateful_widget(table, table_area, &mut state);

    hits.files = table_rows(table_area, state.offset(), files.rows.len())
        .into_iter()
        .map(|(index, rect)| (rect, files.rows[index].file_id))
        .collect();
}

fn draw_form(frame: &mut Frame, area: Rect, form: &FormView) {
    let mut lines = Vec::new();
    for field in &form.fields {
        let marker = if field.focused { "> " } else { "  " };
        let value = if field.editable {
            let cursor = if field.focused { "_" } else { "" };
            format!("{}{}", field.value, cursor)
        } else {
            format!("< {} >", field.value)
        };
        let style = if field.focused {
            Style::new().add_modifier(Modifier::BOLD)
        } else {
            Style::new()
        };
        lines.push(Line::styled(format!("{marker}{}: {value}", field.label), style));
        lines.push(Line::default());
    }

    let hint = match form.upload_mode {
        UploadMode::Folders => "Both folders are read by the server.",
        UploadMode::Archive => "Local path of a .zip archive to upload.",
    };
    lines.push(Line::styled(hint, MUTED));
    lines.push(Line::styled(
        "Tab/Shift+Tab move between fields, Space on Mode switches, Enter creates.",
        MUTED,
    ));
    if let Some(error) = &form.error {
        lines.push(Line::default());
        lines.push(Line::styled(error.clone(), Style::new().fg(Color::Red)));
    }
    if form.submitting {
        lines.push(Line::default());
        lines.push(Line::styled("Creating job...", MUTED));
    }

    let block = Block::bordered().title(format!(" {} ", form.title));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_viewer(frame: &mut Frame, area: Rect, viewer: &ViewerView) -> Rect {
    let surface = layout::centered(area, VIEWER_PERCENT_X, VIEWER_PERCENT_Y);
    frame.render_widget(Clear, surface);

    let mut block = Block::bordered()
        .title(format!(" {} ", viewer.title))
        .border_style(Style::new().fg(Color::Cyan));
    if !viewer.language.is_empty() {
        block = block.title_bottom(Line::from(format!(" {} ", viewer.language)).right_aligned());
    }
    let style = if viewer.loading { MUTED } else { Style::new() };
    let body = Paragraph::new(viewer.text.as_str())
        .style(style)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((viewer.scroll, 0));
    frame.render_widget(body, surface);
    surface
}

fn draw_alert(frame: &mut Frame, area: Rect, message: &str) {
    let surface = layout::centered_fixed(area, ALERT_WIDTH, ALERT_HEIGHT);
    frame.render_widget(Clear, surface);
    let lines = vec![
        Line::from(message.to_string()),
        Line::default(),
        Line::styled("Press Enter or Esc to dismiss.", MUTED),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Error ")
        .border_style(Style::new().fg(Color::Red));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        surface,
    );
}

fn draw_status_line(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let line = match &view.notice {
        Some(notice) => Line::styled(notice.clone(), Style::new().fg(Color::Green)),
        None => Line::styled(" Up/Down select   Ctrl+C quit", MUTED),
    };
    frame.render_widget(Paragraph::new(line), area);
}
