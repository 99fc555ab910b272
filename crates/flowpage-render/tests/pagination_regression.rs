use std::sync::Arc;

use flowpage::{
    Alignment, Document, Metrics, PatternHyphenator, StyleDecoration, StyleLength, TextElement,
    TextModel, TextStyle, WordCursor,
};
use flowpage_render::{
    AreaKind, FixedAdvanceMetrics, LayoutConfig, LineInfoCache, PageKind, Paginator,
    ReadingPosition, SizeUnit, TextLayouter, Viewport,
};

const WORDS: &[&str] = &[
    "the", "reader", "turned", "another", "page", "while", "rain", "kept", "falling",
    "on", "an", "unremarkable", "afternoon", "of", "quiet", "hyphenation", "and",
    "patient", "typesetting", "across", "narrow", "columns", "a", "lighthouse",
];

/// Deterministic prose: `paragraphs` paragraphs of 20 to 60 words.
fn prose(paragraphs: usize, seed: u32) -> Vec<String> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (state >> 16) as usize
    };
    (0..paragraphs)
        .map(|_| {
            let count = 20 + next() % 41;
            (0..count)
                .map(|_| WORDS[next() % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn plain_document(paragraphs: usize) -> Document {
    let mut builder = Document::builder();
    for text in prose(paragraphs, 7) {
        builder = builder.paragraph().text(&text);
    }
    builder.build()
}

fn sectioned_document() -> Document {
    let mut builder = Document::builder();
    for (index, text) in prose(9, 11).iter().enumerate() {
        builder = builder.paragraph().text(text);
        if index % 3 == 2 {
            builder = builder.end_section();
        }
    }
    builder.build()
}

fn patterns() -> Arc<PatternHyphenator> {
    Arc::new(PatternHyphenator::from_patterns(
        "hy3ph he2n hena4 hen5at 1na n2at 1tio 2io o2n 1ter 2ing 1ty 5graph",
    ))
}

fn paginator(doc: Document, width: i32, height: i32) -> Paginator {
    let config = LayoutConfig::for_display(width, height).with_uniform_margin(12);
    let mut paginator = Paginator::new(config).with_hyphenator(patterns());
    paginator
        .set_model(Arc::new(doc))
        .expect("model should install");
    paginator
}

fn page_starts_forward(paginator: &mut Paginator) -> Vec<WordCursor> {
    let mut starts = Vec::new();
    loop {
        let start = paginator
            .current_start_cursor()
            .expect("page should prepare")
            .expect("start should be known");
        starts.push(start);
        assert!(starts.len() < 1_000, "pagination did not terminate");
        if !paginator.has_page(PageKind::Next) {
            return starts;
        }
        paginator
            .turn_page(PageKind::Next)
            .expect("turn should succeed");
    }
}

#[test]
fn pagination_is_deterministic() {
    let mut first = paginator(plain_document(12), 240, 320);
    let mut second = paginator(plain_document(12), 240, 320);
    let a = page_starts_forward(&mut first);
    let b = page_starts_forward(&mut second);
    assert!(a.len() > 3);
    assert_eq!(a, b);
}

#[test]
fn pages_chain_and_cover_every_word_once() {
    let doc = plain_document(10);
    let total_words: usize = (0..doc.paragraph_count())
        .filter_map(|index| doc.paragraph(index))
        .map(|paragraph| {
            paragraph
                .elements()
                .iter()
                .filter(|element| element.is_word())
                .count()
        })
        .sum();
    let mut paginator = paginator(doc, 200, 260);

    let mut finished_words = 0;
    let mut previous_end: Option<WordCursor> = None;
    loop {
        let page = paginator
            .page(PageKind::Current)
            .expect("page should prepare");
        if let Some(end) = &previous_end {
            assert_eq!(page.start_cursor(), Some(end));
        }
        finished_words += page
            .areas()
            .iter()
            .filter(|area| area.kind == AreaKind::Word && area.last_fragment)
            .count();
        previous_end = page.end_cursor().cloned();
        if !paginator.has_page(PageKind::Next) {
            break;
        }
        paginator
            .turn_page(PageKind::Next)
            .expect("turn should succeed");
    }
    assert_eq!(finished_words, total_words);
    assert!(previous_end.is_some_and(|end| end.is_end_of_text()));
}

#[test]
fn areas_stay_inside_the_text_box() {
    let mut paginator = paginator(plain_document(8), 260, 300);
    let config = paginator.config();
    let right_edge = config.margin_left + config.content_width() - 1;
    loop {
        let page = paginator
            .page(PageKind::Current)
            .expect("page should prepare");
        assert_eq!(page.line_area_offsets().len(), page.lines().len() + 1);
        for area in page.areas() {
            assert!(area.x0 >= config.margin_left, "{area:?}");
            assert!(area.x1 <= right_edge, "{area:?}");
            assert!(area.y0 >= config.margin_top, "{area:?}");
        }
        for line in page.lines() {
            assert!(line.width <= config.content_width(), "{line:?}");
        }
        if !paginator.has_page(PageKind::Next) {
            break;
        }
        paginator
            .turn_page(PageKind::Next)
            .expect("turn should succeed");
    }
}

#[test]
fn backward_turns_retrace_forward_pages() {
    let mut paginator = paginator(plain_document(10), 220, 280);
    let forward = page_starts_forward(&mut paginator);
    assert!(forward.len() > 4);

    let mut backward = vec![forward[forward.len() - 1].clone()];
    while paginator.has_page(PageKind::Previous) {
        paginator
            .turn_page(PageKind::Previous)
            .expect("turn should succeed");
        backward.push(
            paginator
                .current_start_cursor()
                .expect("page should prepare")
                .expect("start should be known"),
        );
        assert!(backward.len() <= forward.len());
    }
    backward.reverse();
    assert_eq!(backward, forward);
}

#[test]
fn jump_then_walk_back_uses_backward_search() {
    let mut paginator = paginator(plain_document(10), 220, 280);
    let forward = page_starts_forward(&mut paginator);
    let last = forward.len() - 1;

    paginator
        .go_to(ReadingPosition::from(&forward[last]))
        .expect("jump should succeed");
    for expected in forward[..last].iter().rev().take(3) {
        paginator
            .turn_page(PageKind::Previous)
            .expect("turn should succeed");
        let start = paginator
            .current_start_cursor()
            .expect("page should prepare")
            .expect("start should be known");
        assert_eq!(&start, expected);
    }
}

#[test]
fn justified_lines_reach_the_right_edge() {
    let mut paginator = paginator(plain_document(4), 240, 400);
    let config = paginator.config();
    let right_edge = config.margin_left + config.content_width() - 1;
    let page = paginator
        .page(PageKind::Current)
        .expect("page should prepare");
    let mut checked = 0;
    for (index, line) in page.lines().iter().enumerate() {
        let areas = page.line_areas(index);
        let Some(last) = areas.last() else {
            continue;
        };
        let ends_paragraph = line.is_end_of_paragraph()
            || line.paragraph.element(line.end_element) == Some(&TextElement::ParagraphBoundary);
        if !ends_paragraph && line.space_count > 0 {
            assert_eq!(last.x1, right_edge, "{line:?}");
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn cached_pass_reproduces_fresh_lines() {
    let doc = Document::builder()
        .paragraph()
        .push_style(StyleDecoration {
            space_before: Some(StyleLength::Px(9)),
            space_after: Some(StyleLength::Px(5)),
            alignment: Some(Alignment::Left),
            ..StyleDecoration::default()
        })
        .text(&prose(1, 3)[0])
        .paragraph()
        .text(&prose(1, 5)[0])
        .build();
    let metrics = FixedAdvanceMetrics::default();
    let hyphenator = patterns();
    let viewport = Viewport::new(180, 2_000);
    let start = WordCursor::start_of_text(&doc).expect("document should not be empty");

    let mut cache = LineInfoCache::new();
    let mut layouter = TextLayouter::new(
        &doc,
        &metrics,
        hyphenator.as_ref(),
        Arc::new(TextStyle::default()),
        Metrics::default(),
        &mut cache,
    );
    let (fresh, fresh_end) = layouter
        .fill_page(viewport, &start, None)
        .expect("fill should succeed");
    let (cached, cached_end) = layouter
        .fill_page(viewport, &start, None)
        .expect("fill should succeed");
    assert!(layouter.cached_lines() > 0);
    assert_eq!(fresh, cached);
    assert_eq!(fresh_end, cached_end);
    assert_eq!(cache.hits(), fresh.len());
}

#[test]
fn pages_never_straddle_a_section_marker() {
    let doc = sectioned_document();
    let mut paginator = paginator(doc, 240, 900);
    let mut pages = 0;
    loop {
        let page = paginator
            .page(PageKind::Current)
            .expect("page should prepare");
        for line in page.lines().iter().skip(1) {
            assert!(
                !line.paragraph.is_end_of_section(),
                "section marker inside page at {:?}",
                line.paragraph.index()
            );
        }
        pages += 1;
        if !paginator.has_page(PageKind::Next) {
            break;
        }
        paginator
            .turn_page(PageKind::Next)
            .expect("turn should succeed");
    }
    assert!(pages >= 3);
}

#[test]
fn single_empty_paragraph_is_one_page() {
    let doc = Document::builder().paragraph().build();
    let mut paginator = paginator(doc, 200, 200);
    let page = paginator
        .page(PageKind::Current)
        .expect("page should prepare");
    assert!(page.is_prepared());
    assert!(page.areas().is_empty());
    assert!(!paginator.has_page(PageKind::Next));
    assert!(!paginator.has_page(PageKind::Previous));
}

#[test]
fn backward_search_refills_to_the_same_end() {
    let doc = plain_document(12);
    let metrics = FixedAdvanceMetrics::default();
    let hyphenator = patterns();
    let viewport = Viewport::new(90, 50);
    let mut cache = LineInfoCache::new();
    let mut layouter = TextLayouter::new(
        &doc,
        &metrics,
        hyphenator.as_ref(),
        Arc::new(TextStyle::default()),
        Metrics::default(),
        &mut cache,
    );

    let mut start = WordCursor::start_of_text(&doc).expect("document should not be empty");
    let mut pages = 0;
    let mut split_ends = 0;
    loop {
        let (_, end) = layouter
            .fill_page(viewport, &start, None)
            .expect("fill should succeed");
        if end.char_index() > 0 {
            split_ends += 1;
        }
        let found = layouter
            .find_page_start(viewport, &end, SizeUnit::Pixel, viewport.height)
            .expect("search should succeed");
        let (_, refilled) = layouter
            .fill_page(viewport, &found, None)
            .expect("fill should succeed");
        assert_eq!(
            refilled,
            end,
            "page {:?}..{:?} searched back to {:?}",
            start.position(),
            end.position(),
            found.position()
        );
        assert_eq!(found, start);
        pages += 1;
        assert!(pages < 1_000, "pagination did not terminate");
        if end.is_end_of_text() {
            break;
        }
        start = end;
    }
    assert!(split_ends > 0, "fixture should end a page inside a word");
}

/// Page to the end, then back to the start, checking every seam on the way.
fn turn_back_through(doc: Document) -> (Vec<WordCursor>, Vec<WordCursor>) {
    let mut paginator = paginator(doc, 114, 74);
    let forward = page_starts_forward(&mut paginator);
    let mut backward = vec![forward[forward.len() - 1].clone()];
    while paginator.has_page(PageKind::Previous) {
        let left = paginator
            .current_start_cursor()
            .expect("page should prepare")
            .expect("start should be known");
        paginator
            .turn_page(PageKind::Previous)
            .expect("turn should succeed");
        let end = paginator
            .current_end_cursor()
            .expect("page should prepare")
            .expect("end should be known");
        assert_eq!(end, left, "page seam moved");
        let start = paginator
            .current_start_cursor()
            .expect("page should prepare")
            .expect("start should be known");
        assert!(start < end);
        backward.push(start);
        assert!(backward.len() <= forward.len() + 1);
    }
    backward.reverse();
    (forward, backward)
}

#[test]
fn narrow_backward_turns_keep_split_words_on_the_seam() {
    let (forward, backward) = turn_back_through(plain_document(12));
    assert!(forward.iter().any(|start| start.char_index() > 0));
    assert_eq!(backward, forward);
}

#[test]
fn narrow_backward_turns_keep_seams_across_sections() {
    let (forward, backward) = turn_back_through(sectioned_document());
    assert!(forward.len() > 3);
    assert!(backward[0].is_start_of_text());
}
