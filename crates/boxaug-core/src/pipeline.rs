//! Probability-driven sequencing of transforms.

use rand::{Rng, RngCore};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::error::{ConfigError, GeometryError};
use crate::transform::Transform;

struct Step {
    transform: Box<dyn Transform>,
    probability: f64,
}

/// An ordered list of transforms, each applied independently at its own
/// probability.
///
/// Each step draws one sample from the injected generator and applies its
/// transform when the sample is below the step probability, feeding the
/// result to the next step. Probability 1.0 always applies, 0.0 never
/// does (so a fully configured pipeline can carry disabled steps at zero
/// cost). There is no backtracking: a step that leaves zero surviving
/// boxes is a valid, empty-label result.
#[derive(Default)]
pub struct TransformPipeline {
    steps: Vec<Step>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step. Fails fast on probabilities outside [0, 1].
    pub fn push(
        &mut self,
        transform: Box<dyn Transform>,
        probability: f64,
    ) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&probability) || probability.is_nan() {
            return Err(ConfigError::InvalidProbability(probability));
        }
        self.steps.push(Step {
            transform,
            probability,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order over one annotated image.
    ///
    /// Errors abort this image and surface to the caller; no partial state
    /// is returned.
    pub fn run(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let mut current_image = image.clone();
        let mut current_boxes = boxes.to_vec();

        for step in &self.steps {
            if rng.random::<f64>() < step.probability {
                let (next_image, next_boxes) =
                    step.transform.apply(&current_image, &current_boxes, rng)?;
                current_image = next_image;
                current_boxes = next_boxes;
            }
        }

        Ok((current_image, current_boxes))
    }
}
