use crate::browser;
use anyhow::{anyhow, Result};
// wasm is single threaded, so Rc RefCell over Arc Mutex
use async_trait::async_trait;
use futures::channel::mpsc::UnboundedReceiver;
use futures::channel::oneshot::{channel, Sender};
use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

pub mod frames;
pub mod input;

use self::frames::{AnimationFrames, FrameDriver, SharedLoopClosure};
use self::input::{InputEvent, InputState};

/// What the driver should do once a tick has been drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Restart,
}

#[async_trait(?Send)]
pub trait Game {
    /// Consumes the loading game and returns the loaded one, so this can only
    /// succeed once
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// Runs before the first tick and again after every restart
    fn prelude(&self) -> LocalBoxFuture<'static, Result<()>>;
    fn begin(&mut self);
    fn update(&mut self, input: &mut InputState) -> Tick;
    fn draw(&mut self, renderer: &Renderer);
    fn reset(&mut self);
}

/// ┌──────────────────────── Tick Sequence ─────────────────────────┐
/// │  request_animation_frame                                       │
/// │    └─► tick()                                                  │
/// │         ├─► process_input  (drain listener channel)            │
/// │         ├─► Game::update   (physics + phase update)            │
/// │         ├─► Game::draw     (clear + render)                    │
/// │         └─► Tick::Continue ─► request next frame               │
/// │             Tick::Restart  ─► cancel pending, reset, prelude   │
/// └────────────────────────────────────────────────────────────────┘
/// One frame request is pending at most, tracked by `frames`.
pub struct GameLoop {
    game: RefCell<Box<dyn Game>>,
    renderer: Renderer,
    input: RefCell<InputState>,
    events: RefCell<UnboundedReceiver<InputEvent>>,
    frames: FrameDriver<AnimationFrames>,
}

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let game = game.initialize().await?;
        let frame: SharedLoopClosure = Rc::new(RefCell::new(None));
        let game_loop = Rc::new(GameLoop {
            game: RefCell::new(game),
            renderer: Renderer {
                context: browser::context()?,
            },
            input: RefCell::new(InputState::default()),
            events: RefCell::new(input::prepare_input()?),
            frames: FrameDriver::new(AnimationFrames::new(frame.clone())),
        });

        // the closure keeps the loop alive for the lifetime of the page
        let tick_loop = game_loop.clone();
        *frame.borrow_mut() = Some(browser::create_raf_closure(move |_perf: f64| {
            tick_loop.tick();
        }));

        game_loop.launch();
        Ok(())
    }

    /// Plays the prelude, then begins the game and requests the first frame
    fn launch(self: &Rc<Self>) {
        let prelude = self.game.borrow().prelude();
        let game_loop = self.clone();
        browser::spawn_local(async move {
            if let Err(err) = prelude.await {
                log::error!("GameLoop: prelude failed : {:#?}", err);
                return;
            }
            game_loop.game.borrow_mut().begin();
            if let Err(err) = game_loop.frames.schedule() {
                log::error!("GameLoop: could not start : {:#?}", err);
            }
        });
    }

    fn tick(self: &Rc<Self>) {
        self.frames.fired();

        let tick = {
            let mut input = self.input.borrow_mut();
            input::process_input(&mut input, &mut self.events.borrow_mut());
            let mut game = self.game.borrow_mut();
            let tick = game.update(&mut input);
            game.draw(&self.renderer);
            tick
        };

        match tick {
            Tick::Continue => {
                if let Err(err) = self.frames.schedule() {
                    log::error!("GameLoop: loop stopped : {:#?}", err);
                }
            }
            Tick::Restart => self.restart(),
        }
    }

    /// Cancels the pending frame, rebuilds the game, and plays the prelude
    /// again before the next frame is requested
    pub fn restart(self: &Rc<Self>) {
        self.frames.restart(|| {
            self.game.borrow_mut().reset();
            self.input.borrow_mut().release_pointer();
        });
        self.launch();
    }
}

// ==================== Geometry ====================
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    /// Square of side `side` centered on `center`
    pub fn centered(center: Point, side: f64) -> Self {
        Rect {
            position: Point::new(center.x - side / 2.0, center.y - side / 2.0),
            size: Size {
                width: side,
                height: side,
            },
        }
    }
}

// ==================== Drawing primitives ====================
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    BezierTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: &'static str,
    pub position: Point,
    pub font: String,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub line_width: f64,
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.position.x,
            rect.position.y,
            rect.size.width,
            rect.size.height,
        );
    }

    pub fn set_alpha(&self, alpha: f64) {
        self.context.set_global_alpha(alpha);
    }

    pub fn draw_image(&self, image: &HtmlImageElement, destination: &Rect) {
        if let Err(err) = self
            .context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.position.x,
                destination.position.y,
                destination.size.width,
                destination.size.height,
            )
        {
            log::error!("Renderer: could not draw image : {:#?}", err);
        }
    }

    pub fn fill_rect(&self, color: &str, rect: &Rect) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(
            rect.position.x,
            rect.position.y,
            rect.size.width,
            rect.size.height,
        );
    }

    pub fn fill_path(&self, path: &[PathSegment], style: &PathStyle) {
        self.context.set_fill_style_str(style.fill);
        self.context.begin_path();
        for segment in path {
            match *segment {
                PathSegment::MoveTo(point) => self.context.move_to(point.x, point.y),
                PathSegment::BezierTo {
                    control1,
                    control2,
                    end,
                } => self.context.bezier_curve_to(
                    control1.x, control1.y, control2.x, control2.y, end.x, end.y,
                ),
            }
        }
        self.context.fill();
        self.context.set_stroke_style_str(style.stroke);
        self.context.set_line_width(style.line_width);
        self.context.stroke();
    }

    pub fn draw_text(&self, text: &Text) {
        self.context.set_font(&text.font);
        self.context.set_text_align("center");
        self.context.set_fill_style_str(text.fill);
        self.context.set_stroke_style_str(text.stroke);
        self.context.set_line_width(text.line_width);
        let drawn = self
            .context
            .fill_text(text.content, text.position.x, text.position.y)
            .and_then(|_| {
                self.context
                    .stroke_text(text.content, text.position.x, text.position.y)
            });
        if let Err(err) = drawn {
            log::error!("Renderer: could not draw text : {:#?}", err);
        }
    }
}

/// Resolves with a fresh image element once `source` has loaded
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<()>>();
    // onload and onerror share one sender, the first to fire takes it
    let loaded_tx: ImageSender = Rc::new(RefCell::new(Some(tx)));
    let failed_tx = loaded_tx.clone();
    let failed_source = source.to_string();

    let on_load = browser::closure_once(move || settle(&loaded_tx, Ok(())));
    let on_error = browser::closure_once(move |err: JsValue| {
        settle(
            &failed_tx,
            Err(anyhow!("Could not load image '{}' : {:#?}", failed_source, err)),
        )
    });

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(source);

    // each callback fires at most once, the other is simply never called
    on_load.forget();
    on_error.forget();

    rx.await
        .map_err(|_| anyhow!("Image '{}' was dropped before it loaded", source))??;
    Ok(image)
}

type ImageSender = Rc<RefCell<Option<Sender<Result<()>>>>>;

fn settle(sender: &ImageSender, outcome: Result<()>) {
    if let Some(tx) = sender.borrow_mut().take() {
        let _ = tx.send(outcome);
    }
}
