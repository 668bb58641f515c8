//! Screen scheduler demo
//!
//! Builds a small scene with a row of consoles and a legacy panel, edits
//! their screens, then runs simulation ticks interleaved with renderer
//! "resources freed" signals and logs what got rasterized.

use screen_engine::foundation::logging;
use screen_engine::prelude::*;

const TICKS: usize = 12;
const CONSOLE_COUNT: u32 = 4;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Screen(#[from] ScreenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn resource(name: &str) -> String {
    format!("{}/resources/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn build_scene() -> (SimpleScene, Vec<Entity>, Entity, Entity) {
    let mut scene = SimpleScene::new();
    scene.set_viewpoint(Some(Viewpoint::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0))));

    // Consoles every 60 units; the last one sits beyond the visibility radius
    let consoles = (0..CONSOLE_COUNT)
        .map(|i| {
            let console = scene.spawn(Vec3::new(2.0, 0.0, -20.0 - 60.0 * i as f32));
            scene.set_render_objects(console, vec![100 + i]);
            console
        })
        .collect();

    let panel = scene.spawn(Vec3::new(-2.0, 0.0, -15.0));
    scene.set_render_objects(panel, vec![200]);
    scene.set_name(panel, "Bridge LCD [RLC HangarSign/ScreenArea]");
    scene.add_legacy_surface(panel, true);

    let sign = scene.spawn(Vec3::new(0.0, 5.0, -40.0));
    scene.set_name(sign, "HangarSign");
    scene.set_render_objects(sign, vec![300, 301]);

    (scene, consoles, panel, sign)
}

fn main() -> Result<(), DemoError> {
    logging::init_with_level(log::LevelFilter::Debug);

    let config = SchedulerConfig::load_or_default(resource("scheduler.toml"))?;
    let mut library = LayoutLibrary::new();
    let layout = library.load_file(resource("console.ron"))?;

    let (scene, consoles, panel, sign) = build_scene();
    let mut links = LinkTable::new();
    let panel_label = scene.name(panel).unwrap_or_default().to_string();
    links.watch(panel, &panel_label, &scene);
    log::info!("Panel {panel} mirrors onto {:?}", links.targets(panel));

    let mut scheduler = ScreenUpdateScheduler::new(config, scene, RecordingRenderer::new());
    scheduler.attach();
    for &console in &consoles {
        scheduler.attach_host(console, std::sync::Arc::clone(&layout));
    }

    for (i, &console) in consoles.iter().enumerate() {
        scheduler
            .screen(console, "main")?
            .set_text(format!("Console {i}\nReactor nominal"))
            .set_alignment(TextAlignment::Center);
        scheduler
            .screen(console, "STATUS")?
            .set_foreground(Color::rgb(0, 255, 0))
            .set_text("OK");
        scheduler.screen(console, "Banner")?.set_text("Welcome aboard");
    }
    log::info!("{} of {} hosts pending", scheduler.pending_len(), scheduler.host_count());

    scheduler.scene_mut().mark_legacy_stale(panel);

    for tick in 0..TICKS {
        scheduler.update();

        // The renderer frees budget every third frame
        if tick % 3 == 0 {
            let budget = 600_000 + 200_000 * tick as u64;
            scheduler.renderer_mut().push_resources_freed(budget);
        }
        scheduler.pump_renderer_signals();

        let commands = scheduler.renderer_mut().take_commands();
        log::info!(
            "tick {tick}: {} commands, {} hosts pending, {} screens dirty",
            commands.len(),
            scheduler.pending_len(),
            consoles
                .iter()
                .filter_map(|&c| scheduler.host(c))
                .map(MultiScreenHost::dirty_count)
                .sum::<usize>()
        );
    }

    if let Some(&refresh_budget) = scheduler.scene().legacy_refreshes(panel).first() {
        log::info!("Legacy panel refreshed with budget {refresh_budget}");
        let content = TextContent {
            text: "Hangar doors open".to_string(),
            ..TextContent::default()
        };
        let mut renderer = RecordingRenderer::new();
        let written = links.mirror(panel, &content, 256, 2, scheduler.scene(), &mut renderer);
        log::info!("Mirrored panel onto {written} surfaces of {sign}");
    }

    for &console in &consoles {
        if let Some(host) = scheduler.host(console) {
            log::info!("{console}: {} dirty screens left", host.dirty_count());
        }
    }

    scheduler.detach();
    Ok(())
}
