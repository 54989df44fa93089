use super::Scroll;

#[test]
fn it_clamps_to_the_last_page() {
    let mut scroll = Scroll::default();
    scroll.set_state(30, 10);
    scroll.down_page();
    scroll.down_page();
    scroll.down_page();

    assert_eq!(scroll.position, 20);
}

#[test]
fn it_never_scrolls_above_the_top() {
    let mut scroll = Scroll::default();
    scroll.set_state(30, 10);
    scroll.down();
    scroll.up_page();

    assert_eq!(scroll.position, 0);
}

#[test]
fn it_jumps_to_the_last_line() {
    let mut scroll = Scroll::default();
    scroll.set_state(25, 10);
    scroll.last();
    assert_eq!(scroll.position, 15);

    scroll.set_state(5, 10);
    scroll.last();
    assert_eq!(scroll.position, 0);
}
