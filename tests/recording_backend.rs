use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    rc::Rc,
    time::Duration,
};

use tileshow::{
    BackendError, BackendResult, Compositor, DemoConfig, DemoError, DstRect, FrameLoop,
    LoadError, Placement, RenderBackend, Scene, ScreenDimensions, Size, Texture, load_texture,
    play_scene,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    LoadSurface(PathBuf),
    Upload(PathBuf),
    Clear,
    Copy { texture: u32, dst: Option<DstRect> },
    Present,
}

#[derive(Default, Debug)]
struct Ledger {
    calls: RefCell<Vec<Call>>,
    live_surfaces: Cell<i64>,
    live_textures: Cell<i64>,
}

impl Ledger {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| f(*c)).count()
    }
}

struct FakeSurface {
    path: PathBuf,
    size: Size,
    ledger: Rc<Ledger>,
}

impl Drop for FakeSurface {
    fn drop(&mut self) {
        self.ledger.live_surfaces.set(self.ledger.live_surfaces.get() - 1);
    }
}

#[derive(Debug)]
struct FakeTexture {
    id: u32,
    size: Size,
    ledger: Rc<Ledger>,
}

impl Texture for FakeTexture {
    fn size(&self) -> Size {
        self.size
    }
}

impl Drop for FakeTexture {
    fn drop(&mut self) {
        self.ledger.live_textures.set(self.ledger.live_textures.get() - 1);
    }
}

/// Backend double: "files" are a name -> size table, every call is recorded.
struct RecordingBackend {
    ledger: Rc<Ledger>,
    files: HashMap<PathBuf, Size>,
    reject_uploads: HashSet<PathBuf>,
    next_id: u32,
}

impl RecordingBackend {
    fn new(files: &[(&str, Size)]) -> Self {
        Self {
            ledger: Rc::new(Ledger::default()),
            files: files
                .iter()
                .map(|(p, s)| (PathBuf::from(p), *s))
                .collect(),
            reject_uploads: HashSet::new(),
            next_id: 0,
        }
    }

    fn rejecting_upload_of(mut self, path: &str) -> Self {
        self.reject_uploads.insert(PathBuf::from(path));
        self
    }
}

impl RenderBackend for RecordingBackend {
    type Surface = FakeSurface;
    type Texture = FakeTexture;

    fn load_surface(&self, path: &Path) -> BackendResult<FakeSurface> {
        self.ledger
            .calls
            .borrow_mut()
            .push(Call::LoadSurface(path.to_path_buf()));
        let size = *self
            .files
            .get(path)
            .ok_or_else(|| BackendError::new(format!("Couldn't open {}", path.display())))?;
        self.ledger.live_surfaces.set(self.ledger.live_surfaces.get() + 1);
        Ok(FakeSurface {
            path: path.to_path_buf(),
            size,
            ledger: Rc::clone(&self.ledger),
        })
    }

    fn create_texture_from_surface(&mut self, surface: &FakeSurface) -> BackendResult<FakeTexture> {
        self.ledger
            .calls
            .borrow_mut()
            .push(Call::Upload(surface.path.clone()));
        if self.reject_uploads.contains(&surface.path) {
            return Err(BackendError::new("out of texture memory"));
        }
        self.next_id += 1;
        self.ledger.live_textures.set(self.ledger.live_textures.get() + 1);
        Ok(FakeTexture {
            id: self.next_id,
            size: surface.size,
            ledger: Rc::clone(&self.ledger),
        })
    }

    fn clear(&mut self) -> BackendResult<()> {
        self.ledger.calls.borrow_mut().push(Call::Clear);
        Ok(())
    }

    fn copy(&mut self, texture: &FakeTexture, dst: Option<DstRect>) -> BackendResult<()> {
        self.ledger.calls.borrow_mut().push(Call::Copy {
            texture: texture.id,
            dst,
        });
        Ok(())
    }

    fn present(&mut self) -> BackendResult<()> {
        self.ledger.calls.borrow_mut().push(Call::Present);
        Ok(())
    }
}

fn quick_config(screen: ScreenDimensions) -> DemoConfig {
    DemoConfig {
        screen,
        frame_interval: Duration::ZERO,
        ..DemoConfig::default()
    }
}

#[test]
fn load_then_release_restores_live_count() {
    let mut backend = RecordingBackend::new(&[("a.bmp", Size::new(8, 8))]);
    let ledger = Rc::clone(&backend.ledger);

    let before = ledger.live_textures.get();
    let tex = load_texture(&mut backend, "a.bmp").unwrap();
    assert_eq!(ledger.live_textures.get(), before + 1);
    assert_eq!(ledger.live_surfaces.get(), 0);
    assert_eq!(tex.size(), Size::new(8, 8));

    drop(tex);
    assert_eq!(ledger.live_textures.get(), before);
}

#[test]
fn decode_failure_never_touches_the_renderer() {
    let mut backend = RecordingBackend::new(&[]);
    let ledger = Rc::clone(&backend.ledger);

    let err = load_texture(&mut backend, "missing.bmp").unwrap_err();
    assert!(matches!(err, LoadError::DecodeFailed { .. }));
    assert_eq!(
        ledger.calls(),
        vec![Call::LoadSurface(PathBuf::from("missing.bmp"))]
    );
    assert_eq!(ledger.live_surfaces.get(), 0);
    assert_eq!(ledger.live_textures.get(), 0);
}

#[test]
fn upload_failure_still_releases_the_surface() {
    let mut backend =
        RecordingBackend::new(&[("big.bmp", Size::new(4, 4))]).rejecting_upload_of("big.bmp");
    let ledger = Rc::clone(&backend.ledger);

    let err = load_texture(&mut backend, "big.bmp").unwrap_err();
    match err {
        LoadError::UploadFailed { path, source } => {
            assert_eq!(path, PathBuf::from("big.bmp"));
            assert_eq!(source.message(), "out of texture memory");
        }
        other => panic!("expected upload failure, got {other:?}"),
    }
    assert_eq!(ledger.live_surfaces.get(), 0);
    assert_eq!(ledger.live_textures.get(), 0);
}

#[test]
fn tiled_scene_draws_tiles_then_overlay_every_frame() {
    let screen = ScreenDimensions::new(640, 480);
    let mut backend = RecordingBackend::new(&[
        ("bg.bmp", Size::new(64, 64)),
        ("fg.bmp", Size::new(32, 32)),
    ]);
    let ledger = Rc::clone(&backend.ledger);

    let scene = Scene::Tiled {
        background: "bg.bmp".into(),
        foreground: "fg.bmp".into(),
    };
    play_scene(&mut backend, &quick_config(screen), &scene).unwrap();

    assert_eq!(ledger.count(|c| matches!(c, Call::Clear)), 3);
    assert_eq!(ledger.count(|c| matches!(c, Call::Present)), 3);
    assert_eq!(ledger.live_textures.get(), 0);
    assert_eq!(ledger.live_surfaces.get(), 0);

    let calls = ledger.calls();
    let frames: Vec<&[Call]> = calls
        .split(|c| matches!(c, Call::Present))
        .filter(|f| f.contains(&Call::Clear))
        .collect();
    assert_eq!(frames.len(), 3);

    for frame in frames {
        let start = frame.iter().position(|c| *c == Call::Clear).unwrap();
        let copies: Vec<&Call> = frame[start + 1..].iter().collect();
        assert_eq!(copies.len(), 10 * 8 + 1);

        assert_eq!(
            copies[0],
            &Call::Copy {
                texture: 1,
                dst: Some(DstRect {
                    x: 0,
                    y: 0,
                    width: 64,
                    height: 64
                })
            }
        );
        assert_eq!(
            copies[9],
            &Call::Copy {
                texture: 1,
                dst: Some(DstRect {
                    x: 576,
                    y: 0,
                    width: 64,
                    height: 64
                })
            }
        );
        assert_eq!(
            copies[10],
            &Call::Copy {
                texture: 1,
                dst: Some(DstRect {
                    x: 0,
                    y: 64,
                    width: 64,
                    height: 64
                })
            }
        );
        assert_eq!(
            copies[80],
            &Call::Copy {
                texture: 2,
                dst: Some(DstRect {
                    x: 304,
                    y: 224,
                    width: 32,
                    height: 32
                })
            }
        );
    }
}

#[test]
fn second_decode_failure_releases_the_first_texture() {
    let mut backend = RecordingBackend::new(&[("bg.bmp", Size::new(64, 64))]);
    let ledger = Rc::clone(&backend.ledger);

    let scene = Scene::Tiled {
        background: "bg.bmp".into(),
        foreground: "gone.bmp".into(),
    };
    let err = play_scene(
        &mut backend,
        &quick_config(ScreenDimensions::new(640, 480)),
        &scene,
    )
    .unwrap_err();

    assert!(matches!(err, DemoError::ImageDecode { .. }));
    assert_eq!(err.operation(), "LoadImage");
    assert_eq!(ledger.live_textures.get(), 0);
    assert_eq!(ledger.count(|c| matches!(c, Call::Clear)), 0);
    assert_eq!(ledger.count(|c| matches!(c, Call::Present)), 0);
}

#[test]
fn upload_failure_maps_to_image_upload() {
    let mut backend = RecordingBackend::new(&[
        ("bg.bmp", Size::new(64, 64)),
        ("fg.bmp", Size::new(32, 32)),
    ])
    .rejecting_upload_of("fg.bmp");
    let ledger = Rc::clone(&backend.ledger);

    let scene = Scene::Tiled {
        background: "bg.bmp".into(),
        foreground: "fg.bmp".into(),
    };
    let err = play_scene(
        &mut backend,
        &quick_config(ScreenDimensions::new(64, 64)),
        &scene,
    )
    .unwrap_err();

    assert_eq!(err.operation(), "CreateTextureFromSurface");
    assert_eq!(ledger.live_textures.get(), 0);
    assert_eq!(ledger.live_surfaces.get(), 0);
}

#[test]
fn stretch_scene_draws_full_screen() {
    let mut backend = RecordingBackend::new(&[("hello.bmp", Size::new(10, 10))]);
    let ledger = Rc::clone(&backend.ledger);

    let config = DemoConfig {
        frame_count: 2,
        ..quick_config(ScreenDimensions::new(640, 480))
    };
    let scene = Scene::Stretch {
        image: "hello.bmp".into(),
    };
    play_scene(&mut backend, &config, &scene).unwrap();

    let draws: Vec<Call> = ledger
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Copy { .. }))
        .collect();
    assert_eq!(
        draws,
        vec![
            Call::Copy {
                texture: 1,
                dst: None
            };
            2
        ]
    );
}

#[test]
fn frame_loop_runs_exactly_frame_count_times_even_with_nothing_to_draw() {
    let mut backend = RecordingBackend::new(&[]);
    let ledger = Rc::clone(&backend.ledger);

    FrameLoop::new(5, Duration::ZERO).run(&mut backend, &[]);

    let mut expected = Vec::new();
    for _ in 0..5 {
        expected.push(Call::Clear);
        expected.push(Call::Present);
    }
    assert_eq!(ledger.calls(), expected);
}

#[test]
fn compositor_draw_list_follows_placement_order() {
    let mut backend = RecordingBackend::new(&[
        ("bg.bmp", Size::new(300, 300)),
        ("fg.bmp", Size::new(800, 100)),
    ]);
    let bg = load_texture(&mut backend, "bg.bmp").unwrap();
    let fg = load_texture(&mut backend, "fg.bmp").unwrap();

    let compositor = Compositor::new(ScreenDimensions::new(640, 480));
    let draws = compositor.tiled_with_overlay(&bg, &fg);
    let targets: Vec<_> = draws.iter().map(|d| d.target).collect();
    assert_eq!(
        targets,
        vec![
            tileshow::DrawTarget::At(Placement::new(0, 0)),
            tileshow::DrawTarget::At(Placement::new(300, 0)),
            tileshow::DrawTarget::At(Placement::new(600, 0)),
            tileshow::DrawTarget::At(Placement::new(0, 300)),
            tileshow::DrawTarget::At(Placement::new(300, 300)),
            tileshow::DrawTarget::At(Placement::new(600, 300)),
            tileshow::DrawTarget::At(Placement::new(-80, 190)),
        ]
    );
}
