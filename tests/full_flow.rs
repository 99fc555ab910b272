mod common;

use std::sync::Arc;

use common::corpus::novel;
use embedded_graphics::{mock_display::MockDisplay, pixelcolor::BinaryColor, prelude::*};
use flowpage::{EnglishHeuristicHyphenator, TextModel};
use flowpage_embedded_graphics::{EgRenderConfig, EgRenderer, MonoFontMetrics};
use flowpage_render::{LayoutConfig, PageKind, Paginator, ReadingPosition};

fn reader(width: i32, height: i32) -> Paginator {
    let mut paginator = Paginator::new(LayoutConfig::for_display(width, height).with_uniform_margin(4))
        .with_metrics(MonoFontMetrics::shared())
        .with_hyphenator(Arc::new(EnglishHeuristicHyphenator));
    paginator
        .set_model(Arc::new(novel(2, 3, 42)))
        .expect("set model should succeed");
    paginator
}

#[test]
fn bookmark_resumes_on_the_same_page() {
    let mut first = reader(240, 320);
    for _ in 0..3 {
        first
            .turn_page(PageKind::Next)
            .expect("turn should succeed");
    }
    let position = first
        .reading_position()
        .expect("position should succeed")
        .expect("position should be known");
    let token = position
        .to_json()
        .expect("encode should succeed");
    let expected_end = first
        .current_end_cursor()
        .expect("end should succeed");

    let mut second = reader(240, 320);
    let restored = ReadingPosition::from_json(&token).expect("decode should succeed");
    second
        .go_to(restored)
        .expect("go to should succeed");
    assert_eq!(
        second
            .current_end_cursor()
            .expect("end should succeed"),
        expected_end
    );
}

#[test]
fn chapters_open_on_fresh_pages() {
    let doc = novel(3, 2, 9);
    let markers: Vec<usize> = (0..doc.paragraph_count())
        .filter(|index| {
            doc.paragraph(*index)
                .is_some_and(|paragraph| paragraph.is_end_of_section())
        })
        .collect();
    assert_eq!(markers.len(), 3);
    let mut paginator = reader(300, 2_000);
    paginator
        .set_model(Arc::new(doc))
        .expect("model should install");

    let mut starts = Vec::new();
    loop {
        let start = paginator
            .current_start_cursor()
            .expect("page should prepare")
            .expect("start should be known");
        starts.push(start.paragraph_index());
        if !paginator.has_page(PageKind::Next) {
            break;
        }
        paginator
            .turn_page(PageKind::Next)
            .expect("turn should succeed");
    }
    assert!(starts.len() >= 3, "{starts:?}");
    for start in starts {
        assert!(start == 0 || markers.contains(&start), "page starts at {start}");
    }
}

#[test]
fn small_screen_pages_render_on_mock_display() {
    let mut paginator = reader(64, 64);
    let renderer = EgRenderer::new(EgRenderConfig {
        clear_first: false,
        ..EgRenderConfig::default()
    });
    for _ in 0..4 {
        let page = paginator
            .page(PageKind::Current)
            .expect("page should prepare");
        let mut display = MockDisplay::<BinaryColor>::new();
        display.set_allow_overdraw(true);
        let diagnostics = renderer
            .render_page_with_diagnostics(page, &mut display)
            .expect("render should succeed");
        assert!(diagnostics.words > 0);
        assert!(display.affected_area().size.width > 0);
        paginator
            .turn_page(PageKind::Next)
            .expect("turn should succeed");
    }
}
