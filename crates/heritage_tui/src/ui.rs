//! UI rendering for the playback surface.
//!
//! Slide rendering is a total match over the layout variant: `split`,
//! `centered`, and `full-image` each get a defined composition, and the
//! image region renders a placeholder until imagery arrives.

use heritage_core::{Slide, SlideImage, SlideLayout};
use heritage_deck::{PlaybackController, PlaybackState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Draw the main UI.
#[tracing::instrument(skip_all)]
pub fn draw(f: &mut Frame, controller: &PlaybackController, input: &str) {
    match controller.state() {
        PlaybackState::Presenting => draw_presentation(f, controller),
        _ => draw_prompt(f, controller, input),
    }
}

/// Draw the topic prompt shown while idle, generating, or after an error.
fn draw_prompt(f: &mut Frame, controller: &PlaybackController, input: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Topic input
            Constraint::Min(0),    // Status / error
        ])
        .split(f.area());

    let header = Paragraph::new("HeritageFlow — 数字化传承，让非遗触手可及")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let generating = controller.state() == PlaybackState::Generating;
    let input_style = if generating {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let input_box = Paragraph::new(input)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("输入非遗项目，如：昆曲、剪纸、中医针灸 (Enter 生成)"),
        )
        .style(input_style);
    f.render_widget(input_box, chunks[1]);

    let status: Line = if generating {
        Line::from(Span::styled(
            "正在构建内容...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = controller.error() {
        Line::from(Span::styled(error, Style::default().fg(Color::Red)))
    } else {
        Line::from(Span::styled(
            "Enter: generate | Esc: quit",
            Style::default().fg(Color::Gray),
        ))
    };
    let status = Paragraph::new(status).alignment(Alignment::Center);
    f.render_widget(status, chunks[2]);
}

/// Draw the full-screen presentation view.
fn draw_presentation(f: &mut Frame, controller: &PlaybackController) {
    let Some(slide) = controller.current_slide() else {
        return;
    };

    if controller.fullscreen() {
        draw_slide(f, slide, f.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Slide
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, controller, chunks[0]);
    draw_slide(f, slide, chunks[1]);
    draw_footer(f, controller, chunks[2]);
}

/// Draw the header: topic plus slide-count readout.
fn draw_header(f: &mut Frame, controller: &PlaybackController, area: Rect) {
    let title = format!(
        "{}  —  {} / {}",
        controller.topic(),
        controller.current_index() + 1,
        controller.slide_count()
    );
    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Draw the footer: one indicator dot per slide plus the key hints.
fn draw_footer(f: &mut Frame, controller: &PlaybackController, area: Rect) {
    let dots: Vec<Span> = (0..controller.slide_count())
        .flat_map(|i| {
            let dot = if i == controller.current_index() {
                Span::styled("●", Style::default().fg(Color::Red))
            } else {
                Span::styled("○", Style::default().fg(Color::DarkGray))
            };
            [dot, Span::raw(" ")]
        })
        .collect();

    let help = "←/→: navigate | 1-9: jump | r: refresh image | f: fullscreen | e: export | q: close";
    let status = if controller.status_message().is_empty() {
        help.to_string()
    } else {
        format!("{} | {}", controller.status_message(), help)
    };

    let footer = Paragraph::new(vec![
        Line::from(dots).alignment(Alignment::Center),
        Line::from(Span::styled(status, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

/// Render one slide. Total over the layout variants.
fn draw_slide(f: &mut Frame, slide: &Slide, area: Rect) {
    match slide.layout() {
        SlideLayout::Split => draw_split(f, slide, area),
        SlideLayout::Centered => draw_centered(f, slide, area),
        SlideLayout::FullImage => draw_full_image(f, slide, area),
    }
}

/// Two-region composition: text block beside the image region.
fn draw_split(f: &mut Frame, slide: &Slide, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    f.render_widget(text_block(slide), halves[0]);
    f.render_widget(image_region(slide.image().as_ref()), halves[1]);
}

/// Single-column centered text, no image region.
fn draw_centered(f: &mut Frame, slide: &Slide, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            slide.title().clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::default(),
    ];
    for point in slide.content() {
        lines.push(Line::from(point.clone()).alignment(Alignment::Center));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Full-bleed image with an overlaid title/content block.
fn draw_full_image(f: &mut Frame, slide: &Slide, area: Rect) {
    f.render_widget(image_region(slide.image().as_ref()), area);

    let overlay = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length((slide.content().len() as u16 + 4).min(area.height)),
        ])
        .split(area)[1];

    f.render_widget(Clear, overlay);
    f.render_widget(text_block(slide), overlay);
}

/// Title plus bullet points.
fn text_block(slide: &Slide) -> Paragraph<'_> {
    let mut lines = vec![
        Line::from(Span::styled(
            slide.title().clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for point in slide.content() {
        lines.push(Line::from(format!("• {}", point)));
    }

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true })
}

/// The image region: payload summary once an image arrived, otherwise a
/// placeholder with the manual refresh affordance.
fn image_region(image: Option<&SlideImage>) -> Paragraph<'static> {
    let (text, style) = match image {
        Some(image) => (
            format!(
                "▣ {}  ({} KB)",
                image.mime(),
                image.len() / 1024
            ),
            Style::default().fg(Color::Green),
        ),
        None => (
            "图片生成中... (r: refresh)".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    Paragraph::new(Line::from(Span::styled(text, style)).alignment(Alignment::Center))
        .block(Block::default().borders(Borders::ALL).title("image"))
}
