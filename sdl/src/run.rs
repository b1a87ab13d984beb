use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use log::error;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use otto8::{Chip8, Error};

use crate::display::Display;
use crate::keymap::keymap;

/// Drives the interpreter: renders fresh frames, feeds keyboard events into
/// the keypad, and paces cycles at the requested instruction rate. The core
/// never blocks or sleeps; all timing lives here.
pub fn run(rom: &Path, cycles_per_second: u64) -> Result<(), Error> {
    let mut chip8 = Chip8::new();

    let file = File::open(rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;

    let sdl = sdl2::init().expect("unable to initialize SDL2");
    let mut display = Display::new(&sdl);
    let mut events = sdl.event_pump().expect("unable to get SDL2 event pump");

    let cycle_time = Duration::from_nanos(1_000_000_000 / cycles_per_second.max(1));
    let mut last_cycle = Instant::now();

    // Whether or not the target cycle rate should be respected
    let mut fast_forward = false;

    'event: loop {
        // If the draw flag was set, render the fresh frame
        if let Some(frame) = chip8.frame() {
            display.render(frame);
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state; stack faults are fatal for the program, not for us
        if let Err(e) = chip8.step() {
            error!("halting: {e}");
            break 'event;
        }

        // Handle timing; the next cycle is measured from after the sleep
        let elapsed_cycle_time = last_cycle.elapsed();
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
