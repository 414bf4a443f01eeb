//=========================================================================
// Screens
//=========================================================================
//
// Every screen of the game and the factory the scene manager uses to
// build them.
//
// Architecture:
//   splash            press any key
//   main_menu         hub: both creation paths, load, settings, exit
//   settings          resolution / fullscreen / vsync
//   choice_select     origin and background pickers (one generic screen)
//   skill_distribute  cost-curve skill budget
//   name_input        name entry, saves the character
//   specialization    background cards (quick-start path)
//   free_points       flat category budget
//   appearance        appearance editor, saves the character
//   widgets           layout, backdrop, buttons
//
//=========================================================================

//=== Module Declarations =================================================

mod appearance;
mod choice_select;
mod free_points;
mod main_menu;
mod name_input;
mod settings;
mod skill_distribute;
mod specialization;
mod splash;
mod widgets;

//=== Internal Dependencies ===============================================

use crate::core::character::{Background, Origin};
use crate::core::globals::GameContext;
use crate::core::scene::{Scene, SceneId};

use appearance::AppearanceScene;
use choice_select::ChoiceSelectScene;
use free_points::FreePointsScene;
use main_menu::MainMenuScene;
use name_input::NameInputScene;
use settings::SettingsScene;
use skill_distribute::SkillDistributeScene;
use specialization::SpecializationScene;
use splash::SplashScene;

//=== Factory =============================================================

/// Builds a fresh screen for `id`.
pub fn build_scene(id: SceneId, ctx: &mut GameContext) -> Box<dyn Scene> {
    match id {
        SceneId::Splash => Box::new(SplashScene::new(ctx)),
        SceneId::MainMenu => Box::new(MainMenuScene::new(ctx)),
        SceneId::Settings => Box::new(SettingsScene::new(ctx)),
        SceneId::OriginSelect => {
            Box::new(ChoiceSelectScene::<Origin>::new(ctx, SceneId::BackgroundSelect))
        }
        SceneId::BackgroundSelect => {
            Box::new(ChoiceSelectScene::<Background>::new(ctx, SceneId::SkillDistribute))
        }
        SceneId::SkillDistribute => Box::new(SkillDistributeScene::new(ctx)),
        SceneId::NameInput => Box::new(NameInputScene::new(ctx)),
        SceneId::Specialization => Box::new(SpecializationScene::new(ctx)),
        SceneId::FreePointsAllocate => Box::new(FreePointsScene::new(ctx)),
        SceneId::Appearance => Box::new(AppearanceScene::new(ctx)),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::character::{CreationChoice, SkillCategory, FREE_POINT_BUDGET};
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::render::recording::RecordingCanvas;
    use crate::core::scene::SceneManager;
    use tempfile::TempDir;

    const FRAME: f32 = 1.0 / 60.0;

    fn press(scenes: &mut SceneManager, ctx: &mut GameContext, key: KeyCode) {
        scenes.dispatch(&InputEvent::key_down(key), ctx);
        scenes.tick(FRAME, ctx);
    }

    fn spend_skill_points(ctx: &mut GameContext) {
        for category in SkillCategory::ALL {
            for subskill in category.subskill_names() {
                for _ in 0..5 {
                    if ctx.character.skill_points().is_exhausted() {
                        return;
                    }
                    ctx.character.raise_subskill(category, subskill).unwrap();
                }
            }
        }
    }

    #[test]
    fn every_scene_builds_and_renders() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());

        for id in SceneId::ALL {
            let mut scene = build_scene(id, &mut ctx);
            scene.on_enter(&mut ctx);
            scene.update(FRAME, &mut ctx);
            let mut canvas = RecordingCanvas::new(1280, 720);
            scene.render(&mut canvas, &ctx);
            assert!(!canvas.commands.is_empty(), "{:?} drew nothing", id);
            assert!(!scene.is_finished());
        }
    }

    #[test]
    fn settings_round_trip_from_menu() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scenes = SceneManager::new(build_scene, SceneId::MainMenu, &mut ctx);

        for _ in 0..3 {
            press(&mut scenes, &mut ctx, KeyCode::ArrowDown);
        }
        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::Settings);

        press(&mut scenes, &mut ctx, KeyCode::ArrowDown);
        press(&mut scenes, &mut ctx, KeyCode::ArrowDown);
        press(&mut scenes, &mut ctx, KeyCode::ArrowRight);
        press(&mut scenes, &mut ctx, KeyCode::ArrowDown);
        press(&mut scenes, &mut ctx, KeyCode::Enter);

        assert_eq!(scenes.current_id(), SceneId::MainMenu);
        assert!(ctx.config_store.path().exists());
        assert!(!ctx.config_store.load().vsync);
        assert!(ctx.take_config_change().is_some());
    }

    #[test]
    fn origin_path_creates_named_save() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scenes = SceneManager::new(build_scene, SceneId::Splash, &mut ctx);

        press(&mut scenes, &mut ctx, KeyCode::Space);
        assert_eq!(scenes.current_id(), SceneId::MainMenu);

        press(&mut scenes, &mut ctx, KeyCode::ArrowDown);
        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::OriginSelect);

        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::BackgroundSelect);
        assert_eq!(ctx.character.origin(), Some(Origin::ALL[0]));

        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::SkillDistribute);
        assert_eq!(ctx.character.background(), Some(Background::ALL[0]));

        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::SkillDistribute);

        spend_skill_points(&mut ctx);
        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::NameInput);

        for c in "Nyx".chars() {
            scenes.dispatch(&InputEvent::Text(c), &mut ctx);
        }
        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::MainMenu);

        let slots = ctx.saves.list_slots();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].player_name, "Nyx");
        assert_eq!(slots[0].slot_name, "Nyx");
    }

    #[test]
    fn quick_start_path_creates_save() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scenes = SceneManager::new(build_scene, SceneId::MainMenu, &mut ctx);

        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::Specialization);

        scenes.dispatch(&InputEvent::MouseMoved { x: 460.0, y: 250.0 }, &mut ctx);
        scenes.dispatch(&InputEvent::left_click(), &mut ctx);
        scenes.tick(FRAME, &mut ctx);
        assert_eq!(scenes.current_id(), SceneId::FreePointsAllocate);
        assert_eq!(ctx.character.background(), Some(Background::ALL[2]));

        for _ in 0..FREE_POINT_BUDGET {
            ctx.character.free_points_mut().add(SkillCategory::Social).unwrap();
        }
        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::Appearance);

        press(&mut scenes, &mut ctx, KeyCode::KeyR);
        press(&mut scenes, &mut ctx, KeyCode::Enter);
        assert_eq!(scenes.current_id(), SceneId::MainMenu);
        assert_eq!(ctx.saves.list_slots().len(), 1);
        assert!(ctx.session().is_some());
    }

    #[test]
    fn escape_mid_flow_returns_to_menu() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let mut scenes = SceneManager::new(build_scene, SceneId::OriginSelect, &mut ctx);

        press(&mut scenes, &mut ctx, KeyCode::Escape);

        assert_eq!(scenes.current_id(), SceneId::MainMenu);
        assert!(ctx.saves.list_slots().is_empty());
        assert_eq!(ctx.character.origin(), None);
    }
}
