use super::*;
use crate::test_support::assert_line_index_fresh;

fn code_doc(text: &str) -> Document {
    let mut doc = Document::from_text(text);
    doc.set_mode(EditorMode::Code);
    doc
}

#[test]
fn typing_keeps_line_index_in_sync() {
    let mut doc = Document::new();
    for ch in "ab\ncd\n\nef".chars() {
        assert!(doc.insert_char(ch));
        assert_line_index_fresh(&doc);
    }
    doc.move_cursor(3, false);
    doc.insert_char('\n');
    assert_line_index_fresh(&doc);
    assert!(doc.backspace());
    assert!(doc.backspace());
    assert_line_index_fresh(&doc);
    assert_eq!(doc.text(), "abcd\n\nef");
    assert_eq!(doc.cursor(), 2);
}

#[test]
fn replacing_a_selection_is_one_undo_step() {
    let mut doc = Document::from_text("abcdef");
    doc.move_cursor(2, false);
    doc.move_cursor(5, true);
    assert!(doc.insert_text("XY"));
    assert_eq!(doc.text(), "abXYf");
    assert_eq!(doc.cursor(), 4);
    assert!(!doc.has_selection());

    assert!(doc.undo());
    assert_eq!(doc.text(), "abcdef");
    assert_eq!(doc.selection_range(), Some(2..5));
    assert_eq!(doc.cursor(), 5);

    assert!(doc.redo());
    assert_eq!(doc.text(), "abXYf");
    assert_eq!(doc.cursor(), 4);
    assert!(!doc.has_selection());
}

#[test]
fn save_point_survives_edit_then_undo() {
    let mut doc = Document::from_text("draft");
    assert!(!doc.is_modified());
    doc.move_cursor(5, false);
    doc.insert_text("!");
    doc.mark_saved();
    doc.insert_text("?");
    assert!(doc.is_modified());
    doc.undo();
    assert!(!doc.is_modified());
}

#[test]
fn move_cursor_keeps_first_anchor_while_extending() {
    let mut doc = Document::from_text("hello");
    doc.move_cursor(1, false);
    doc.move_cursor(3, true);
    doc.move_cursor(4, true);
    assert_eq!(doc.anchor(), Some(1));
    assert_eq!(doc.selection_range(), Some(1..4));
    doc.move_cursor(99, false);
    assert_eq!(doc.cursor(), 5);
    assert_eq!(doc.anchor(), None);
}

#[test]
fn backspace_and_delete_remove_selection_first() {
    let mut doc = Document::from_text("one two");
    doc.set_selection(3, 7);
    assert!(doc.delete_forward());
    assert_eq!(doc.text(), "one");
    assert!(!doc.delete_forward());
    doc.move_cursor(0, false);
    assert!(!doc.backspace());
}

#[test]
fn cut_and_paste_move_text() {
    let mut doc = Document::from_text("alpha beta");
    doc.set_selection(0, 6);
    assert_eq!(doc.cut().as_deref(), Some("alpha "));
    assert_eq!(doc.text(), "beta");
    doc.move_cursor(4, false);
    assert!(doc.paste("\r\nline\r\n"));
    assert_eq!(doc.text(), "beta\nline\n");
    assert_line_index_fresh(&doc);
    assert_eq!(doc.cut(), None);
}

#[test]
fn line_and_column_conversions_clamp() {
    let doc = Document::from_text("ab\ncde\n");
    assert_eq!(doc.offset_to_line_col(4), (1, 1));
    assert_eq!(doc.offset_to_line_col(100), (2, 0));
    assert_eq!(doc.line_col_to_offset(1, 99), 6);
    assert_eq!(doc.line_col_to_offset(9, 0), 7);
}

#[test]
fn visual_rows_follow_wrap_column_changes() {
    let mut doc = Document::from_text("hello world wrapped text");
    doc.set_wrap_col(10);
    assert_eq!(doc.visual_row_count(), 4);
    assert_eq!(doc.offset_to_visual_row_col(14), (2, 2));
    assert_eq!(doc.visual_row_col_to_offset(0, 99), 5);
    assert_eq!(doc.visual_row_col_to_offset(3, 99), 24);
    doc.set_wrap_col(80);
    assert_eq!(doc.visual_row_count(), 1);
    doc.set_mode(EditorMode::Code);
    doc.set_wrap_col(10);
    assert_eq!(doc.visual_row_count(), 1);
}

fn visual_row_starts(doc: &mut Document) -> Vec<usize> {
    (0..doc.visual_row_count())
        .map(|row| doc.visual_row_start(row))
        .collect()
}

#[test]
fn content_edits_rewrap_rows() {
    let mut doc = Document::from_text("hello world wrapped text");
    doc.set_wrap_col(10);
    assert_eq!(visual_row_starts(&mut doc), vec![0, 6, 12, 20]);

    doc.move_cursor(24, false);
    doc.insert_text("abcdefgh");
    assert_eq!(doc.visual_row_count(), 5);
    assert_eq!(visual_row_starts(&mut doc), vec![0, 6, 12, 20, 30]);

    // Joining "world" and "wrapped" forces a hard break inside the new word.
    doc.move_cursor(12, false);
    assert!(doc.backspace());
    assert_eq!(doc.text(), "hello worldwrapped textabcdefgh");
    assert_eq!(visual_row_starts(&mut doc), vec![0, 6, 16, 19, 29]);

    doc.undo();
    assert_eq!(visual_row_starts(&mut doc), vec![0, 6, 12, 20, 30]);
}

#[test]
fn typing_over_a_selection_patches_the_line_index() {
    let mut doc = Document::from_text("alpha\nbeta\ngamma");
    let rescans = doc.line_index().rescans();

    doc.set_selection(6, 10);
    doc.insert_text("BETA");
    doc.set_selection(5, 6);
    doc.insert_text(" ");
    assert_eq!(doc.text(), "alpha BETA\ngamma");
    doc.set_selection(0, 5);
    assert!(doc.delete_selection());
    assert_eq!(doc.line_index().rescans(), rescans);
    assert_line_index_fresh(&doc);

    doc.select_all();
    doc.insert_text("a\nb\nc");
    assert_eq!(doc.line_index().rescans(), rescans + 2);
    assert_line_index_fresh(&doc);
}

#[test]
fn vertical_motion_keeps_desired_column() {
    let mut doc = code_doc("long line\nab\nanother line");
    doc.move_cursor(7, false);
    assert!(doc.move_vertical(1, false));
    assert_eq!(doc.cursor(), 12);
    assert_eq!(doc.desired_col(), Some(7));
    assert!(doc.move_vertical(1, false));
    assert_eq!(doc.cursor(), 20);
    assert!(!doc.move_vertical(1, false));
    doc.move_right(false, false);
    assert_eq!(doc.desired_col(), None);
}

#[test]
fn code_mode_vertical_motion_counts_tab_columns() {
    let mut doc = code_doc("\tx\nabcdef");
    doc.move_cursor(1, false);
    assert_eq!(doc.visual_col_of(1), 4);
    doc.move_vertical(1, false);
    assert_eq!(doc.cursor(), 7);
    doc.move_vertical(-1, false);
    assert_eq!(doc.cursor(), 1);
}

#[test]
fn prose_vertical_motion_walks_visual_rows() {
    let mut doc = Document::from_text("hello world wrapped text");
    doc.set_wrap_col(10);
    doc.move_cursor(2, false);
    doc.move_vertical(1, false);
    assert_eq!(doc.cursor(), 8);
    doc.move_page(10, true);
    assert_eq!(doc.cursor(), 22);
    assert_eq!(doc.selection_range(), Some(8..22));
    doc.move_page(10, true);
    assert_eq!(doc.cursor(), 24);
    assert_eq!(doc.selection_range(), Some(8..24));
}

#[test]
fn left_and_right_collapse_selection() {
    let mut doc = Document::from_text("abcdef");
    doc.set_selection(1, 4);
    doc.move_left(false, false);
    assert_eq!((doc.cursor(), doc.anchor()), (1, None));
    doc.set_selection(4, 1);
    doc.move_right(false, false);
    assert_eq!((doc.cursor(), doc.anchor()), (4, None));
}

#[test]
fn word_motion_and_selection() {
    let mut doc = Document::from_text("foo_bar, baz qux");
    assert_eq!(doc.word_start(12), 9);
    assert_eq!(doc.word_end(9), 12);
    assert_eq!(doc.word_end(7), 7);
    doc.move_cursor(7, false);
    doc.move_right(false, true);
    assert_eq!(doc.cursor(), 12);
    doc.move_left(false, true);
    assert_eq!(doc.cursor(), 9);
    assert!(doc.select_word_at(2));
    assert_eq!(doc.selected_text().as_deref(), Some("foo_bar"));
    assert!(doc.select_word_at(9));
    assert_eq!(doc.selected_text().as_deref(), Some("baz"));
    assert!(!doc.select_word_at(8));
    assert!(!doc.has_selection());
}

#[test]
fn smart_home_toggles_between_indent_and_row_start() {
    let mut doc = code_doc("x\n    indented");
    doc.move_cursor(10, false);
    doc.move_home(false);
    assert_eq!(doc.cursor(), 6);
    doc.move_home(false);
    assert_eq!(doc.cursor(), 2);
    doc.move_end(false);
    assert_eq!(doc.cursor(), 14);
}

#[test]
fn word_deletion_is_single_undo_entry() {
    let mut doc = Document::from_text("hello brave world");
    doc.move_cursor(12, false);
    assert!(doc.delete_word_backward());
    assert_eq!(doc.text(), "hello world");
    doc.move_cursor(5, false);
    assert!(doc.delete_word_forward());
    assert_eq!(doc.text(), "helloworld");
    doc.undo();
    doc.undo();
    assert_eq!(doc.text(), "hello brave world");
    assert_eq!(doc.cursor(), 12);
}

#[test]
fn code_newline_copies_indent_and_opens_blocks() {
    let mut doc = code_doc("    if x {");
    doc.move_cursor(10, false);
    assert!(doc.insert_newline());
    assert_eq!(doc.text(), "    if x {\n        ");
    assert_eq!(doc.cursor(), 19);
    doc.undo();
    assert_eq!(doc.text(), "    if x {");

    let mut prose = Document::from_text("    quote");
    prose.move_cursor(9, false);
    prose.insert_newline();
    assert_eq!(prose.text(), "    quote\n");
}

#[test]
fn tab_inserts_per_mode() {
    let mut doc = Document::new();
    doc.insert_tab();
    assert_eq!(doc.text(), "\t");
    let mut code = code_doc("");
    code.insert_tab();
    assert_eq!(code.text(), "    ");
}

#[test]
fn block_indent_and_dedent_round_trip() {
    let mut doc = code_doc("a\nb\nc\n");
    doc.set_selection(0, 4);
    assert!(doc.indent_selection());
    assert_eq!(doc.text(), "    a\n    b\nc\n");
    assert_eq!(doc.selection_range(), Some(0..11));
    assert_line_index_fresh(&doc);

    assert!(doc.dedent_selection());
    assert_eq!(doc.text(), "a\nb\nc\n");
    assert_eq!(doc.selection_range(), Some(0..3));

    doc.undo();
    assert_eq!(doc.text(), "    a\n    b\nc\n");
    doc.undo();
    assert_eq!(doc.text(), "a\nb\nc\n");
    assert_eq!(doc.selection_range(), Some(0..4));
}

#[test]
fn dedent_without_indent_is_a_no_op() {
    let mut doc = code_doc("flush");
    assert!(!doc.dedent_selection());
    assert!(!doc.can_undo());
    let mut prose = Document::from_text("    text");
    assert!(!prose.dedent_selection());
}

#[test]
fn line_moves_swap_neighbours() {
    let mut doc = code_doc("one\ntwo\nthree");
    doc.move_cursor(5, false);
    assert!(doc.move_line_up());
    assert_eq!(doc.text(), "two\none\nthree");
    assert_eq!(doc.cursor(), 1);
    assert!(!doc.move_line_up());

    doc.move_cursor(9, false);
    assert!(!doc.move_line_down());
    doc.move_cursor(5, false);
    assert!(doc.move_line_down());
    assert_eq!(doc.text(), "two\nthree\none");
    assert_eq!(doc.cursor(), 11);
    assert_line_index_fresh(&doc);

    doc.undo();
    assert_eq!(doc.text(), "two\none\nthree");
    doc.undo();
    assert_eq!(doc.text(), "one\ntwo\nthree");
}

#[test]
fn replace_all_reverts_with_one_undo() {
    let mut doc = Document::from_text("Cat cat\ncAT");
    assert_eq!(doc.find_all("cat"), vec![0, 4, 8]);
    assert_eq!(doc.replace_all("cat", "dog!"), 3);
    assert_eq!(doc.text(), "dog! dog!\ndog!");
    assert_eq!(doc.cursor(), 14);
    assert_line_index_fresh(&doc);
    assert!(doc.undo());
    assert_eq!(doc.text(), "Cat cat\ncAT");
    assert!(!doc.can_undo());
    assert!(doc.redo());
    assert_eq!(doc.text(), "dog! dog!\ndog!");
    assert_eq!(doc.replace_all("bird", "x"), 0);
}

#[test]
fn match_navigation_selects_and_wraps() {
    let mut doc = Document::from_text("ab ab ab");
    assert!(doc.select_next_match("AB"));
    assert_eq!(doc.selection_range(), Some(0..2));
    assert!(doc.select_next_match("ab"));
    assert_eq!(doc.selection_range(), Some(3..5));
    assert!(doc.select_prev_match("ab"));
    assert_eq!(doc.selection_range(), Some(0..2));
    assert!(doc.select_prev_match("ab"));
    assert_eq!(doc.selection_range(), Some(6..8));
    assert!(!doc.select_next_match("zz"));
}

#[test]
fn replace_at_groups_the_replacement() {
    let mut doc = Document::from_text("say hi");
    assert!(doc.replace_at(4, 2, "hello"));
    assert_eq!(doc.text(), "say hello");
    doc.undo();
    assert_eq!(doc.text(), "say hi");
}

#[test]
fn stats_are_recomputed_lazily_after_edits() {
    let mut doc = Document::from_text("one two");
    assert_eq!(doc.stats().words, 2);
    doc.move_cursor(7, false);
    doc.insert_text(" three\nfour");
    let stats = doc.stats();
    assert_eq!(stats.words, 4);
    assert_eq!(stats.lines, 2);
    let delta = doc.session_delta();
    assert_eq!(delta.words, 2);
    doc.reset_session_baseline();
    assert_eq!(doc.session_delta().words, 0);
}

#[test]
fn from_bytes_normalizes_and_keeps_crlf() {
    let config = EditorConfig::default();
    let doc = Document::from_bytes(b"\xEF\xBB\xBFa\r\nb\r\n", &config).expect("load");
    assert_eq!(doc.text(), "a\nb\n");
    assert_eq!(doc.line_ending(), LineEnding::CrLf);
    assert_eq!(doc.to_bytes(), b"a\r\nb\r\n");
    assert!(!doc.is_modified());
    assert!(matches!(
        Document::from_bytes(b"\xC3", &config),
        Err(EditorError::InvalidUtf8 { .. })
    ));
}

#[test]
fn from_bytes_honors_configured_load_limit() {
    let config = EditorConfig {
        max_load_bytes: 4,
        ..EditorConfig::default()
    };
    assert_eq!(
        Document::from_bytes(b"12345", &config).map(|doc| doc.text()),
        Err(EditorError::TooLarge { size: 5, limit: 4 })
    );
    assert_eq!(
        Document::from_bytes(b"1234", &config).map(|doc| doc.text()),
        Ok("1234".to_string())
    );
}

#[test]
fn mode_detection_uses_extension() {
    assert_eq!(EditorMode::for_path(Path::new("main.RS")), EditorMode::Code);
    assert_eq!(EditorMode::for_path(Path::new("notes.md")), EditorMode::Prose);
    assert_eq!(EditorMode::for_path(Path::new("README")), EditorMode::Prose);
}

#[test]
fn mutation_counter_tracks_buffer_edits() {
    let mut doc = Document::from_text("x");
    let before = doc.mutation();
    doc.move_cursor(1, false);
    doc.insert_char('y');
    doc.undo();
    assert!(doc.mutation() > before + 1);
}
