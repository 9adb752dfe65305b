//! COM radio simulation in the style of a Bendix/King KY196 panel.
//!
//! A declaratively-built machine drives the radio through its OFF/ON/READY
//! cycle and the frequency-editing states. Deferred actions are drained
//! after each command; a handler returning `true` feeds the READY
//! continuation event back into the machine, which is how the simulated
//! avionics warm-up rejoins the state graph.
//!
//! Commands: q/a adjust the standby frequency by 1 MHz, w/s by 25 kHz,
//! u swaps active/standby, o toggles the avionics, ? prints help,
//! CTRL+D quits.

use flowstate::{action_enum, ActionQueue, Builder, Event, Machine};
use parking_lot::Mutex;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const MIN_FREQUENCY: f64 = 118.000;
const MAX_FREQUENCY: f64 = 135.975;
const CHANNEL_BANDWIDTH: f64 = 0.025;

action_enum! {
    enum RadioAction {
        On,
        Off,
        Ready,
        Swap,
        IntUp,
        IntDown,
        DecUp,
        DecDown,
    }
}

/// Frequency state owned by the driving loop and mutated only through the
/// action handler.
#[derive(Default)]
struct Radio {
    active: Option<f64>,
    standby: Option<f64>,
}

impl Radio {
    /// Execute one deferred action. The returned flag asks the loop to
    /// drive the READY continuation event.
    fn apply(&mut self, action: &RadioAction) -> bool {
        match action {
            RadioAction::On => {
                // simulate the avionics warm-up
                thread::sleep(Duration::from_secs(2));
                self.active = Some(MIN_FREQUENCY);
                self.standby = Some(MIN_FREQUENCY);
                true
            }
            RadioAction::Off => {
                self.active = None;
                self.standby = None;
                false
            }
            RadioAction::Ready => false,
            RadioAction::Swap => {
                std::mem::swap(&mut self.active, &mut self.standby);
                true
            }
            RadioAction::IntUp => self.adjust(1.0),
            RadioAction::IntDown => self.adjust(-1.0),
            RadioAction::DecUp => self.adjust(CHANNEL_BANDWIDTH),
            RadioAction::DecDown => self.adjust(-CHANNEL_BANDWIDTH),
        }
    }

    fn adjust(&mut self, delta: f64) -> bool {
        if let Some(standby) = self.standby.as_mut() {
            *standby += delta;
            // wrap around the airband
            if *standby < MIN_FREQUENCY {
                *standby = MAX_FREQUENCY;
            } else if *standby > MAX_FREQUENCY {
                *standby = MIN_FREQUENCY;
            }
        }
        true
    }

    fn display(&self) -> String {
        match (self.active, self.standby) {
            (Some(active), Some(standby)) => {
                format!("active:[{active:.3}] - standby:[{standby:.3}]")
            }
            _ => "active:[---.---] - standby:[---.---]".to_string(),
        }
    }
}

/// The radio's state graph. Every editing state bounces back to READY via
/// the continuation event.
fn radio_spec() -> serde_json::Value {
    json!({
        "Version": "1.0.0",
        "Events": ["OFF", "ON", "READY", "SWAP", "INT_UP", "INT_DOWN", "DEC_UP", "DEC_DOWN"],
        "States": [
            { "name": "OFF", "type": "begin", "enter": "off" },
            { "name": "ON", "enter": "on" },
            { "name": "READY", "enter": "ready" },
            { "name": "SWAP", "enter": "swap" },
            { "name": "INT_UP", "enter": "int_up" },
            { "name": "INT_DOWN", "enter": "int_down" },
            { "name": "DEC_UP", "enter": "dec_up" },
            { "name": "DEC_DOWN", "enter": "dec_down" },
        ],
        "Transitions": [
            { "event": "ON", "begin": "OFF", "end": "ON" },
            { "event": "READY", "begin": "ON", "end": "READY" },
            { "event": "OFF", "begin": "READY", "end": "OFF" },
            { "event": "SWAP", "begin": "READY", "end": "SWAP" },
            { "event": "READY", "begin": "SWAP", "end": "READY" },
            { "event": "INT_UP", "begin": "READY", "end": "INT_UP" },
            { "event": "READY", "begin": "INT_UP", "end": "READY" },
            { "event": "INT_DOWN", "begin": "READY", "end": "INT_DOWN" },
            { "event": "READY", "begin": "INT_DOWN", "end": "READY" },
            { "event": "DEC_UP", "begin": "READY", "end": "DEC_UP" },
            { "event": "READY", "begin": "DEC_UP", "end": "READY" },
            { "event": "DEC_DOWN", "begin": "READY", "end": "DEC_DOWN" },
            { "event": "READY", "begin": "DEC_DOWN", "end": "READY" },
        ],
    })
}

fn find<'a>(events: &'a [Event], name: &str) -> &'a Event {
    events
        .iter()
        .find(|event| event.name() == name)
        .expect("event declared in the specification")
}

fn drive(machine: &mut Machine<RadioAction>, event: &Event) {
    if let Err(err) = machine.update(event) {
        println!("!! {err}");
    }
}

fn print_help() {
    println!("q: increase frequency by 1MHz");
    println!("a: decrease frequency by 1MHz");
    println!("w: increase frequency by 25kHz");
    println!("s: decrease frequency by 25kHz");
    println!("u: swap active/standby frequencies");
    println!("o: avionics on/off");
    println!("CTRL+D to quit");
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let output = Builder::<RadioAction>::from_value(radio_spec())?.build()?;
    let mut machine = output.machine;
    let events = output.events;

    let queue = ActionQueue::new();
    let radio = Arc::new(Mutex::new(Radio::default()));
    let handler_radio = Arc::clone(&radio);
    machine.setup(move |action| handler_radio.lock().apply(action), queue.clone());
    machine.start()?;

    let ready = find(&events, "READY").clone();
    let mut avionics_on = false;

    let stdin = io::stdin();
    loop {
        println!("{}", radio.lock().display());
        print!("(qawsuo?)> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "?" => print_help(),
            "q" => drive(&mut machine, find(&events, "INT_UP")),
            "a" => drive(&mut machine, find(&events, "INT_DOWN")),
            "w" => drive(&mut machine, find(&events, "DEC_UP")),
            "s" => drive(&mut machine, find(&events, "DEC_DOWN")),
            "u" => drive(&mut machine, find(&events, "SWAP")),
            "o" => {
                if avionics_on {
                    drive(&mut machine, find(&events, "OFF"));
                } else {
                    drive(&mut machine, find(&events, "ON"));
                }
                avionics_on = !avionics_on;
            }
            "" => {}
            _ => println!("unknown command, ? for help"),
        }

        // Drain deferred actions; a true result re-drives the machine with
        // the READY continuation event.
        while let Some(work) = queue.pop() {
            if work.run() {
                drive(&mut machine, &ready);
            }
        }
    }

    println!();
    Ok(())
}
