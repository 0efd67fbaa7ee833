//! End-to-end tests for the drawing primitives

use crate::common::*;
use crate::common::fixtures::DRAWING;
use crate::common::vm::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

#[test]
fn write_sets_one_pixel() {
    let vm = run("__write 3, 4, #ff8800;");
    assert_eq!(vm.pixel(3, 4), 0xff8800);
    assert_eq!(vm.pixels.len(), 1);
}

#[test]
fn write_box_fills_rectangle() {
    let vm = run("__write_box 1, 2, 3, 2, #0000ff;");
    assert_eq!(vm.pixels.len(), 6);
    assert_eq!(vm.pixel(1, 2), 0x0000ff);
    assert_eq!(vm.pixel(3, 3), 0x0000ff);
    assert_eq!(vm.pixel(4, 2), 0);
    assert_eq!(vm.pixel(1, 4), 0);
}

#[test]
fn drawing_and_reading_back() {
    assert_eq!(run_output(DRAWING), ["#ff0000", "#00ff00", "#000000"]);
}

#[test]
fn canvas_dimensions() {
    let output = run_output("__print __width; __print __height;");
    assert_eq!(output, [DISPLAY_WIDTH.to_string(), DISPLAY_HEIGHT.to_string()]);
}

#[test]
fn fill_whole_canvas() {
    let vm = run("__write_box 0, 0, __width, __height, #101010;");
    assert_eq!(vm.pixels.len(), (DISPLAY_WIDTH * DISPLAY_HEIGHT) as usize);
}

#[test]
fn random_stays_below_bound() {
    let source = r#"
        for (let i : int = 0; i < 50; i = i + 1) {
            let r : int = __random_int 6;
            if ((r < 0) or (r >= 6)) { __print "out of range"; }
        }
    "#;
    assert!(run_output(source).is_empty());
}

#[test]
fn delay_passes_its_argument() {
    let vm = run("__delay 16; __delay 8 * 2 + 1;");
    assert_eq!(vm.delays, [16, 17]);
}

#[test]
fn checkerboard() {
    let source = r#"
        for (let y : int = 0; y < 4; y = y + 1) {
            for (let x : int = 0; x < 4; x = x + 1) {
                if ((x + y) % 2 == 0) { __write x, y, #ffffff; }
            }
        }
    "#;
    let vm = run(source);
    assert_eq!(vm.pixels.len(), 8);
    assert_eq!(vm.pixel(0, 0), 0xffffff);
    assert_eq!(vm.pixel(1, 0), 0);
    assert_eq!(vm.pixel(1, 1), 0xffffff);
}
