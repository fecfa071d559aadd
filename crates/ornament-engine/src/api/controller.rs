use crate::api::config::SceneConfig;
use crate::api::error::{Result, SceneError};
use crate::api::types::{
    ConfigurationOutcome, ConfigurationTransition, FrameReport, ParticleId, SceneConfiguration,
    TextureHandle,
};
use crate::assets::manifest::PhotoSource;
use crate::assets::placeholder::placeholder_image;
use crate::assets::registry::{TextureRegistry, TextureRequest};
use crate::components::layer::Layer;
use crate::core::graph::SceneGraph;
use crate::core::pool::ParticlePool;
use crate::core::reparent::{select_focus_target, sync_layers};
use crate::core::resolver::{self, ResolveContext};
use crate::core::rng::Rng;
use crate::input::policy::{GesturePolicy, ModePolicy};
use crate::input::sample::FrameInput;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::InstanceBuffer;
use crate::renderer::pipeline::RenderPipeline;
use crate::renderer::traits::{FrameData, Renderer, ResourceRequest, Starfield};
use crate::systems::lighting::LightRig;
use crate::systems::render::build_layer_instances;
use crate::systems::starfield::StarfieldState;

/// Owns the whole scene and drives it one frame per `tick`.
///
/// Single-threaded: every method runs on the frame-driving thread. Photo
/// textures arrive through tickets the host completes between ticks.
pub struct SceneController<R: Renderer> {
    renderer: R,
    config: SceneConfig,
    photos: Vec<PhotoSource>,
    rng: Rng,
    pool: ParticlePool,
    graph: SceneGraph,
    textures: TextureRegistry,
    placeholder: TextureHandle,
    camera: Camera3D,
    lights: LightRig,
    starfield: StarfieldState,
    pipeline: RenderPipeline,
    policy: Box<dyn ModePolicy>,
    configuration: SceneConfiguration,
    focus: Option<ParticleId>,
    last_transition: Option<ConfigurationTransition>,
    policy_transition: Option<ConfigurationTransition>,
    frame: u64,
    last_time: f32,
    bloom_buffer: InstanceBuffer,
    overlay_buffer: InstanceBuffer,
}

impl<R: Renderer> SceneController<R> {
    /// Build the distribution, pool, graph layers and backend resources.
    /// `particle_count` overrides `config.particle_count`.
    pub fn construct(
        mut renderer: R,
        photos: &[PhotoSource],
        particle_count: usize,
        mut config: SceneConfig,
    ) -> Result<Self> {
        if particle_count == 0 {
            return Err(SceneError::EmptyScene);
        }
        config.particle_count = particle_count;

        let mut rng = Rng::new(config.seed);
        let pool = ParticlePool::build(photos.len(), &config, &mut rng);
        let starfield = StarfieldState::generate(&config.starfield, &mut rng);
        let lights = LightRig::festive(config.max_lights);

        renderer.acquire(&ResourceRequest {
            instances: pool.len(),
            lights: lights.count(),
            stars: starfield.len(),
        })?;
        let placeholder = match renderer.upload_texture(&placeholder_image()) {
            Ok(handle) => handle,
            Err(err) => {
                renderer.release();
                return Err(err.into());
            }
        };

        let graph = SceneGraph::build(pool.as_slice());
        let textures = TextureRegistry::request_all(&pool, photos, placeholder);
        let camera = Camera3D::from_config(&config.camera);
        let pipeline = RenderPipeline::new(config.bloom.clone());
        let capacity = pool.len();

        log::info!(
            "scene constructed on {}: {} particles, {} photos, {} photo particles",
            renderer.backend(),
            pool.len(),
            photos.len(),
            pool.photo_ids().len()
        );

        Ok(Self {
            renderer,
            config,
            photos: photos.to_vec(),
            rng,
            pool,
            graph,
            textures,
            placeholder,
            camera,
            lights,
            starfield,
            pipeline,
            policy: Box::new(GesturePolicy),
            configuration: SceneConfiguration::Tree,
            focus: None,
            last_transition: None,
            policy_transition: None,
            frame: 0,
            last_time: 0.0,
            bloom_buffer: InstanceBuffer::with_capacity(capacity),
            overlay_buffer: InstanceBuffer::with_capacity(1),
        })
    }

    /// Replace the gesture-to-configuration policy.
    pub fn with_policy(mut self, policy: impl ModePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Request a configuration change.
    ///
    /// Idempotent when already in `target`. Entering `Focus` picks a random
    /// photo particle; with none available the request is declined and the
    /// configuration stays as it was. Layers are synced in the same call.
    pub fn set_configuration(&mut self, target: SceneConfiguration) -> ConfigurationOutcome {
        if target == self.configuration {
            return ConfigurationOutcome::Unchanged;
        }

        let focus = if target == SceneConfiguration::Focus {
            match self.focus.or_else(|| select_focus_target(&self.pool, &mut self.rng)) {
                Some(id) => Some(id),
                None => {
                    log::warn!("focus requested with no photo particles, staying in {}", self.configuration.name());
                    return ConfigurationOutcome::Declined;
                }
            }
        } else {
            None
        };

        let from = self.configuration;
        self.configuration = target;
        self.focus = focus;
        let reparented = sync_layers(&mut self.pool, &mut self.graph, focus);

        let transition = ConfigurationTransition {
            from,
            to: target,
            frame: self.frame,
        };
        self.last_transition = Some(transition);
        log::info!("configuration {} -> {} at frame {}", from.name(), target.name(), self.frame);

        ConfigurationOutcome::Changed { transition, reparented }
    }

    /// Advance one frame: apply the mode policy, move the group, resolve
    /// every particle and draw both passes. Never blocks.
    pub fn tick(&mut self, input: &FrameInput) -> FrameReport {
        let sample = input.sample.sanitized();
        let time = if input.time.is_finite() { input.time } else { self.last_time };
        self.last_time = time;

        self.textures.poll();

        // A policy-driven change keeps the next frame from re-selecting a
        // focus target while the previous transition is still settling.
        let transitioning = self
            .policy_transition
            .is_some_and(|t| t.frame + 1 == self.frame);
        let desired = self.policy.desired(&sample, self.configuration, transitioning);
        if desired != self.configuration {
            if let ConfigurationOutcome::Changed { transition, .. } = self.set_configuration(desired) {
                self.policy_transition = Some(transition);
            }
        }
        let transitioned = self.last_transition.is_some_and(|t| t.frame == self.frame);

        let group = resolver::update_group(self.graph.group(), self.configuration, &sample, &self.config.motion);
        if group.pitch.is_finite() && group.yaw.is_finite() {
            self.graph.set_group(group);
        }

        let ctx = ResolveContext {
            configuration: self.configuration,
            focus: self.focus,
            camera: &self.camera,
            time,
            motion: &self.config.motion,
            scatter: &self.config.scatter,
            focus_config: &self.config.focus,
        };
        resolver::resolve(&mut self.pool, &self.graph, &ctx);

        self.pipeline.breathe(time);
        self.starfield.advance(time);

        build_layer_instances(&self.pool, &self.graph, &self.textures, Layer::Bloom, &mut self.bloom_buffer);
        build_layer_instances(&self.pool, &self.graph, &self.textures, Layer::Overlay, &mut self.overlay_buffer);

        let passes = self
            .pipeline
            .passes(self.bloom_buffer.as_slice(), self.overlay_buffer.as_slice());
        let frame = FrameData {
            frame: self.frame,
            camera: self.camera.uniform(),
            passes: &passes,
            lights: self.lights.as_slice(),
            starfield: Starfield {
                points: self.starfield.points(),
                yaw: self.starfield.yaw(),
            },
            fog_density: self.config.fog_density,
        };
        self.renderer.draw(&frame);

        let report = FrameReport {
            frame: self.frame as f32,
            configuration: self.configuration.as_u8() as f32,
            bloom_instances: self.bloom_buffer.len() as f32,
            overlay_instances: self.overlay_buffer.len() as f32,
            bloom_strength: self.pipeline.strength(),
            transitioned: if transitioned { 1.0 } else { 0.0 },
        };
        self.frame += 1;
        report
    }

    /// Rebuild the pool for a new photo list. Photo textures of the old pool
    /// go back to the renderer, outstanding photo requests are cancelled,
    /// focus is cleared and the configuration resets to `Tree`.
    pub fn replace_photos(&mut self, photos: &[PhotoSource]) {
        // Completions that arrived since the last tick still hold a slot.
        self.textures.poll();
        let released = self.textures.bound_textures();
        for handle in &released {
            self.renderer.release_texture(*handle);
        }
        self.textures.cancel_all();

        let from = self.configuration;
        self.focus = None;
        self.pool = ParticlePool::build(photos.len(), &self.config, &mut self.rng);
        let group = self.graph.group();
        self.graph = SceneGraph::build(self.pool.as_slice());
        self.graph.set_group(group);
        self.photos = photos.to_vec();
        self.textures = TextureRegistry::request_all(&self.pool, &self.photos, self.placeholder);

        self.configuration = SceneConfiguration::Tree;
        if from != SceneConfiguration::Tree {
            self.last_transition = Some(ConfigurationTransition {
                from,
                to: SceneConfiguration::Tree,
                frame: self.frame,
            });
        }
        log::info!(
            "photos replaced: {} photos, {} photo particles, {} textures released",
            photos.len(),
            self.pool.photo_ids().len(),
            released.len()
        );
    }

    /// Photo requests not yet handed to the host.
    pub fn take_texture_requests(&mut self) -> Vec<TextureRequest> {
        self.textures.take_requests()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width as f32, height as f32);
        self.renderer.resize(width, height);
    }

    /// Release backend resources and give the renderer back. Outstanding
    /// photo tickets become no-ops.
    pub fn dispose(mut self) -> R {
        self.textures.cancel_all();
        self.renderer.release();
        log::info!("scene disposed after {} frames", self.frame);
        self.renderer
    }

    // -- Accessors --

    pub fn configuration(&self) -> SceneConfiguration {
        self.configuration
    }

    pub fn focus(&self) -> Option<ParticleId> {
        self.focus
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    /// The camera may be moved freely; the focus target tracks it.
    pub fn camera_mut(&mut self) -> &mut Camera3D {
        &mut self.camera
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn photos(&self) -> &[PhotoSource] {
        &self.photos
    }

    pub fn last_transition(&self) -> Option<ConfigurationTransition> {
        self.last_transition
    }

    /// Index of the next frame `tick` will render.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use image::RgbaImage;
    use crate::api::error::{AssetError, RenderError};
    use crate::input::sample::{Gesture, PointerSample};
    use crate::renderer::traits::{ClearFlags, DrawStats, PostEffect};

    /// Records what it is asked to draw.
    #[derive(Default)]
    struct MockRenderer {
        fail_acquire: bool,
        textures: u32,
        frames: Vec<(usize, usize, Vec<ClearFlags>, usize)>,
        last_overlay_textures: Vec<Option<TextureHandle>>,
        resized: Option<(u32, u32)>,
        released: bool,
        released_textures: Vec<TextureHandle>,
    }

    impl Renderer for MockRenderer {
        fn backend(&self) -> &'static str {
            "mock"
        }

        fn acquire(&mut self, request: &ResourceRequest) -> std::result::Result<(), RenderError> {
            if self.fail_acquire {
                return Err(RenderError::ContextUnavailable("no gpu".into()));
            }
            assert!(request.instances > 0);
            Ok(())
        }

        fn upload_texture(&mut self, _image: &RgbaImage) -> std::result::Result<TextureHandle, RenderError> {
            let handle = TextureHandle(self.textures);
            self.textures += 1;
            Ok(handle)
        }

        fn release_texture(&mut self, handle: TextureHandle) {
            self.released_textures.push(handle);
        }

        fn draw(&mut self, frame: &FrameData) -> DrawStats {
            let bloom = frame.pass(Layer::Bloom).map_or(0, |p| p.instances.len());
            let overlay = frame.pass(Layer::Overlay).map_or(0, |p| p.instances.len());
            let clears = frame.passes.iter().map(|p| p.clear).collect();
            let effects = frame.passes.first().map_or(0, |p| p.effects.len());
            self.last_overlay_textures = frame
                .pass(Layer::Overlay)
                .map(|p| p.instances.iter().map(|i| i.texture()).collect())
                .unwrap_or_default();
            self.frames.push((bloom, overlay, clears, effects));
            DrawStats {
                passes: frame.passes.len() as u32,
                instances: frame.instance_count() as u32,
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.resized = Some((width, height));
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    fn photos(n: usize) -> Vec<PhotoSource> {
        (0..n).map(|i| PhotoSource::new(format!("photo-{}.jpg", i))).collect()
    }

    fn scene(n_photos: usize) -> SceneController<MockRenderer> {
        SceneController::construct(MockRenderer::default(), &photos(n_photos), 300, SceneConfig::default())
            .expect("construct")
    }

    fn input(gesture: Gesture, t: f32) -> FrameInput {
        FrameInput::new(PointerSample::new(gesture, Vec2::new(0.3, 0.7)), t)
    }

    fn overlay_count<R: Renderer>(s: &SceneController<R>) -> usize {
        s.pool().iter().filter(|p| p.layer() == Layer::Overlay).count()
    }

    #[test]
    fn construct_starts_in_tree_with_apex() {
        let s = scene(0);
        assert_eq!(s.configuration(), SceneConfiguration::Tree);
        assert_eq!(s.pool().len(), 301);
        assert_eq!(s.focus(), None);
        assert!(s.graph().is_consistent(s.pool().as_slice()));
        assert_eq!(s.renderer().textures, 1);
    }

    #[test]
    fn construct_fails_when_context_unavailable() {
        let renderer = MockRenderer { fail_acquire: true, ..Default::default() };
        let err = SceneController::construct(renderer, &photos(1), 100, SceneConfig::default());
        assert!(matches!(err, Err(SceneError::Resource(RenderError::ContextUnavailable(_)))));
    }

    #[test]
    fn construct_rejects_empty_scene() {
        let err = SceneController::construct(MockRenderer::default(), &[], 0, SceneConfig::default());
        assert!(matches!(err, Err(SceneError::EmptyScene)));
    }

    #[test]
    fn focus_without_photos_is_declined() {
        let mut s = scene(0);
        s.set_configuration(SceneConfiguration::Scatter);
        assert_eq!(s.set_configuration(SceneConfiguration::Focus), ConfigurationOutcome::Declined);
        assert_eq!(s.configuration(), SceneConfiguration::Scatter);
        assert_eq!(overlay_count(&s), 0);

        s.tick(&input(Gesture::Pinch, 0.0));
        assert_eq!(s.configuration(), SceneConfiguration::Scatter);
    }

    #[test]
    fn pinch_in_scatter_focuses_the_single_photo() {
        let mut s = scene(1);
        s.set_configuration(SceneConfiguration::Scatter);
        let report = s.tick(&input(Gesture::Pinch, 0.0));

        assert_eq!(s.configuration(), SceneConfiguration::Focus);
        assert_eq!(report.configuration(), Some(SceneConfiguration::Focus));
        assert_eq!(report.transitioned, 1.0);
        let focus = s.focus().unwrap();
        assert!(s.pool().get(focus).unwrap().is_photo());
        assert_eq!(s.pool().get(focus).unwrap().layer(), Layer::Overlay);
        assert_eq!(overlay_count(&s), 1);
        assert_eq!(report.overlay_instances, 1.0);
    }

    #[test]
    fn scatter_focus_scatter_round_trip() {
        let mut s = scene(3);
        s.set_configuration(SceneConfiguration::Scatter);
        let outcome = s.set_configuration(SceneConfiguration::Focus);
        assert_eq!(outcome.reparented(), 1);
        let focused = s.focus().unwrap();

        let outcome = s.set_configuration(SceneConfiguration::Scatter);
        assert_eq!(outcome.reparented(), 1);
        assert_eq!(s.focus(), None);
        assert_eq!(s.pool().get(focused).unwrap().layer(), Layer::Bloom);
        assert!(s.graph().is_consistent(s.pool().as_slice()));
    }

    #[test]
    fn repeated_set_configuration_is_idempotent() {
        let mut s = scene(2);
        assert!(matches!(s.set_configuration(SceneConfiguration::Scatter), ConfigurationOutcome::Changed { .. }));
        assert_eq!(s.set_configuration(SceneConfiguration::Scatter), ConfigurationOutcome::Unchanged);

        s.set_configuration(SceneConfiguration::Focus);
        let focused = s.focus();
        assert_eq!(s.set_configuration(SceneConfiguration::Focus), ConfigurationOutcome::Unchanged);
        assert_eq!(s.focus(), focused);
    }

    #[test]
    fn fist_open_fist_gives_tree_scatter_tree() {
        let mut s = scene(2);
        let mut seen = Vec::new();
        for (i, (g, pos)) in [
            (Gesture::Fist, Vec2::new(0.0, 0.0)),
            (Gesture::OpenHand, Vec2::new(0.9, 0.1)),
            (Gesture::Fist, Vec2::new(0.4, 1.0)),
        ]
        .into_iter()
        .enumerate()
        {
            s.tick(&FrameInput::new(PointerSample::new(g, pos), i as f32));
            seen.push(s.configuration());
        }
        assert_eq!(seen, vec![SceneConfiguration::Tree, SceneConfiguration::Scatter, SceneConfiguration::Tree]);
    }

    #[test]
    fn pinch_right_after_policy_transition_waits_a_frame() {
        let mut s = scene(2);
        s.tick(&input(Gesture::OpenHand, 0.0));
        assert_eq!(s.configuration(), SceneConfiguration::Scatter);
        s.tick(&input(Gesture::Pinch, 0.016));
        assert_eq!(s.configuration(), SceneConfiguration::Scatter);
        s.tick(&input(Gesture::Pinch, 0.032));
        assert_eq!(s.configuration(), SceneConfiguration::Focus);
    }

    #[test]
    fn overlay_never_holds_more_than_one() {
        let mut s = scene(4);
        let script = [
            Gesture::OpenHand, Gesture::Pinch, Gesture::Pinch, Gesture::Pinch, Gesture::OpenHand,
            Gesture::Pinch, Gesture::Pinch, Gesture::Fist, Gesture::Pinch, Gesture::OpenHand,
            Gesture::None, Gesture::Pinch, Gesture::Pinch,
        ];
        for (i, g) in script.into_iter().enumerate() {
            s.tick(&input(g, i as f32 * 0.016));
            assert!(overlay_count(&s) <= 1);
            assert_eq!(overlay_count(&s), s.graph().members(Layer::Overlay).len());
            assert!(s.graph().is_consistent(s.pool().as_slice()));
            if s.configuration() != SceneConfiguration::Focus {
                assert_eq!(s.focus(), None);
            }
        }
    }

    #[test]
    fn targets_survive_any_number_of_ticks() {
        let mut s = scene(2);
        let before: Vec<(Vec3, Vec3)> = s.pool().iter().map(|p| (p.tree_target(), p.scatter_target())).collect();
        for i in 0..120 {
            let g = [Gesture::OpenHand, Gesture::Pinch, Gesture::Fist][i % 3];
            s.tick(&input(g, i as f32 * 0.016));
        }
        let after: Vec<(Vec3, Vec3)> = s.pool().iter().map(|p| (p.tree_target(), p.scatter_target())).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn focused_photo_converges_in_front_of_camera() {
        let mut s = scene(1);
        s.set_configuration(SceneConfiguration::Scatter);
        s.set_configuration(SceneConfiguration::Focus);
        let id = s.focus().unwrap();
        for i in 0..300 {
            s.tick(&FrameInput::idle(i as f32 * 0.016));
        }
        let p = s.pool().get(id).unwrap();
        let world = s.graph().world_of(p);
        assert!((world.translation - Vec3::new(0.0, 0.0, 30.0)).length() < 0.01);
        assert!((world.scale - 5.0).abs() < 0.01);
    }

    #[test]
    fn focused_photo_follows_a_moving_camera() {
        let mut s = scene(1);
        s.set_configuration(SceneConfiguration::Scatter);
        s.set_configuration(SceneConfiguration::Focus);
        let id = s.focus().unwrap();
        for i in 0..300 {
            s.tick(&FrameInput::idle(i as f32 * 0.016));
        }

        s.camera_mut().position = Vec3::new(10.0, 0.0, 40.0);
        s.camera_mut().target = Vec3::new(10.0, 0.0, 0.0);
        for i in 300..600 {
            s.tick(&FrameInput::idle(i as f32 * 0.016));
        }
        let p = s.pool().get(id).unwrap();
        let world = s.graph().world_of(p);
        assert!((world.translation - Vec3::new(10.0, 0.0, 30.0)).length() < 0.01);
        assert!((world.scale - 5.0).abs() < 0.01);
        assert_eq!(s.focus(), Some(id));
    }

    #[test]
    fn every_frame_draws_two_ordered_passes() {
        let mut s = scene(0);
        s.tick(&FrameInput::idle(0.0));
        let (bloom, overlay, clears, effects) = s.renderer().frames[0].clone();
        assert_eq!(bloom, 301);
        assert_eq!(overlay, 0);
        assert_eq!(clears, vec![ClearFlags::ALL, ClearFlags::DEPTH_ONLY]);
        assert_eq!(effects, 3);
    }

    #[test]
    fn failed_photo_renders_placeholder() {
        let mut s = scene(1);
        let requests = s.take_texture_requests();
        assert!(!requests.is_empty());
        for r in requests {
            assert!(r.ticket.fail(AssetError::Fetch("offline".into())));
        }
        s.set_configuration(SceneConfiguration::Scatter);
        s.set_configuration(SceneConfiguration::Focus);
        s.tick(&FrameInput::idle(0.0));
        assert_eq!(s.renderer().last_overlay_textures, vec![Some(TextureHandle::PLACEHOLDER)]);
        assert_eq!(s.configuration(), SceneConfiguration::Focus);
    }

    #[test]
    fn resolved_photo_renders_its_texture() {
        let mut s = scene(1);
        for r in s.take_texture_requests() {
            r.ticket.resolve(TextureHandle(9));
        }
        s.set_configuration(SceneConfiguration::Scatter);
        s.set_configuration(SceneConfiguration::Focus);
        s.tick(&FrameInput::idle(0.0));
        assert_eq!(s.renderer().last_overlay_textures, vec![Some(TextureHandle(9))]);
    }

    #[test]
    fn pending_photo_renders_without_texture() {
        let mut s = scene(1);
        let _held = s.take_texture_requests();
        s.set_configuration(SceneConfiguration::Scatter);
        s.set_configuration(SceneConfiguration::Focus);
        s.tick(&FrameInput::idle(0.0));
        assert_eq!(s.renderer().last_overlay_textures, vec![None]);
    }

    #[test]
    fn dispose_releases_and_cancels_tickets() {
        let mut s = scene(2);
        let requests = s.take_texture_requests();
        let renderer = s.dispose();
        assert!(renderer.released);
        for r in requests {
            assert!(r.ticket.is_cancelled());
            assert!(!r.ticket.resolve(TextureHandle(1)));
        }
    }

    #[test]
    fn replace_photos_rebuilds_and_resets_to_tree() {
        let mut s = scene(0);
        s.set_configuration(SceneConfiguration::Scatter);
        assert!(s.take_texture_requests().is_empty());

        s.replace_photos(&photos(3));
        assert_eq!(s.configuration(), SceneConfiguration::Tree);
        assert_eq!(s.focus(), None);
        assert_eq!(s.pool().len(), 301);
        assert!(s.pool().photo_ids().len() >= 3);
        assert_eq!(s.take_texture_requests().len(), s.pool().photo_ids().len());
        assert!(s.graph().is_consistent(s.pool().as_slice()));
    }

    #[test]
    fn replace_photos_cancels_outstanding_requests() {
        let mut s = scene(2);
        let old = s.take_texture_requests();
        s.replace_photos(&photos(1));
        for r in old {
            assert!(r.ticket.is_cancelled());
        }
    }

    #[test]
    fn replace_photos_hands_photo_textures_back() {
        let mut s = scene(2);
        for (i, request) in s.take_texture_requests().into_iter().enumerate() {
            // Two particles share slot 10; the rest get their own.
            let slot = if i < 2 { 10 } else { 10 + i as u32 };
            assert!(request.ticket.resolve(TextureHandle(slot)));
        }
        let expected = s.pool().photo_ids().len().saturating_sub(1);
        s.replace_photos(&photos(1));

        let released = &s.renderer().released_textures;
        assert_eq!(released.len(), expected);
        assert!(released.contains(&TextureHandle(10)));
        assert!(!released.contains(&TextureHandle::PLACEHOLDER));
        assert!(s.textures().bound_textures().is_empty());
    }

    #[test]
    fn no_samples_is_no_hand() {
        let mut s = scene(1);
        for i in 0..10 {
            s.tick(&FrameInput::idle(i as f32));
        }
        assert_eq!(s.configuration(), SceneConfiguration::Tree);
        assert!(s.graph().group().yaw > 0.0);
    }

    #[test]
    fn non_finite_time_does_not_poison_the_frame() {
        let mut s = scene(1);
        s.tick(&FrameInput::idle(1.0));
        let report = s.tick(&FrameInput::idle(f32::NAN));
        assert!(report.bloom_strength.is_finite());
        assert!(s.pool().iter().all(|p| p.live().is_finite()));
    }

    #[test]
    fn resize_reaches_camera_and_renderer() {
        let mut s = scene(0);
        s.resize(1000, 500);
        assert_eq!(s.camera().aspect, 2.0);
        assert_eq!(s.renderer().resized, Some((1000, 500)));
    }

    #[test]
    fn bloom_chain_uses_breathing_strength() {
        let mut s = scene(0);
        s.tick(&FrameInput::idle(3.0));
        let fx = s.pipeline.bloom_effects();
        assert!(matches!(fx[1], PostEffect::Bloom { strength, .. } if strength == s.pipeline.strength()));
    }

    struct AlwaysScatter;

    impl ModePolicy for AlwaysScatter {
        fn desired(&mut self, _: &PointerSample, _: SceneConfiguration, _: bool) -> SceneConfiguration {
            SceneConfiguration::Scatter
        }
    }

    #[test]
    fn custom_policy_replaces_gestures() {
        let mut s = scene(0).with_policy(AlwaysScatter);
        s.tick(&input(Gesture::Fist, 0.0));
        assert_eq!(s.configuration(), SceneConfiguration::Scatter);
    }
}
