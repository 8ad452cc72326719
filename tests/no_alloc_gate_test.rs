use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_puyo::core::{settle, Board, MatchResolver, Session, SessionConfig, SessionSnapshot};
use arrayvec::ArrayVec;

use tui_puyo::engine::{search, Arena};
use tui_puyo::term::{FrameBuffer, GameView, Panel, Viewport};
use tui_puyo::types::{GameAction, TICK_MS};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// One test per binary: the counter is global, so parallel tests would race.
#[test]
fn hot_paths_do_not_allocate() {
    let mut s = Session::new(SessionConfig::default(), 1).expect("valid config");
    let mut snap = SessionSnapshot::default();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(vp.width, vp.height);
    let chain = Board::from_rows(&["B.....", "R.....", "RR....", "RBBB.."]);
    let arena = Arena::versus(SessionConfig::default(), 3, [None, None]).expect("valid config");

    let allocs = with_alloc_counting(|| {
        // Under 200 ticks of gravity the pair falls but never locks.
        for _ in 0..200 {
            s.update(TICK_MS);
            s.apply_action(GameAction::MoveLeft);
            s.apply_action(GameAction::RotateCw);
            s.snapshot_into(&mut snap);
        }

        let mut board = chain.clone();
        let mut resolver = MatchResolver::new();
        while resolver.resolve(&mut board).is_some() {
            settle(&mut board);
        }

        if let Some(pair) = s.current() {
            let _ = search(s.board(), pair);
        }

        let panels = [Panel {
            session: &s,
            title: "P1",
            callout: None,
        }];
        view.render_into(&panels, vp, &mut fb);

        // A versus frame as the runner builds it.
        let panels: ArrayVec<Panel<'_>, 2> = arena
            .players()
            .iter()
            .map(|p| Panel {
                session: &p.session,
                title: if p.is_ai() { "CPU" } else { "P1" },
                callout: Some("Fire!"),
            })
            .collect();
        view.render_into(&panels, vp, &mut fb);
    });

    assert_eq!(allocs, 0);
}
