use std::fs::File;
use std::time::{Duration, Instant};

use readsmore::{Input, Node, Options, Page, Preset, Terminal, TruncationController};
use simplelog::{Config, LevelFilter, WriteLogger};

const PARAGRAPHS: &[&str] = &[
    "Rust is a multi-paradigm, general-purpose programming language that emphasizes \
     performance, type safety, and concurrency. It enforces memory safety without a \
     garbage collector, using a borrow checker that tracks the lifetime of every reference \
     at compile time.",
    "Cargo is the Rust package manager. It downloads your package's dependencies, compiles \
     your packages, makes distributable packages, and uploads them to the community's \
     package registry.",
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("readsmore.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut term = Terminal::new()?;
    let (width, _) = term.size()?;

    let mut page = Page::new(width.min(72));
    let mut elements = Vec::new();
    page.add(Node::block("Click a toggle, or press 1-3. q quits."));
    for text in PARAGRAPHS {
        elements.push(page.add(Node::block(*text).class("content")));
    }
    elements.push(page.add(
        Node::block("Character mode cuts this sentence after forty characters, mid-word.")
            .class("content")
            .data("read-smore-chars", "40"),
    ));

    let options = Options::preset(Preset::Animated)
        .words_count(20)
        .inline(true)
        .animation_duration(Duration::from_millis(300));
    let mut controller = TruncationController::new(page, elements, options);
    controller.initialize(std::future::ready(())).await?;

    loop {
        term.render(controller.dom())?;

        let timeout = if controller.has_active_transitions() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(250)
        };

        for input in term.poll(controller.dom(), timeout)? {
            let now = Instant::now();
            match input {
                Input::Key('q') | Input::Escape => return Ok(()),
                Input::Key(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    if let Err(e) = controller.activate_at(index, now) {
                        log::info!("[demo] {e}");
                    }
                }
                Input::Toggle(id) => {
                    controller.handle_click(&id, now)?;
                }
                Input::Resize { width, .. } => {
                    // Heights measured at startup stay as they were
                    controller.dom_mut().set_width(width.min(72));
                }
                _ => {}
            }
        }

        controller.tick(Instant::now())?;
    }
}
