//! C4: SignatureSynthesis. Folds every target of a selector into one
//! callable signature: upper-bound inputs, upper-bound outputs, boxing
//! flags.

use crate::config::BuilderConfig;
use crate::error::Result;
use crate::lattice::TypeLattice;
use crate::model::{CallSignature, ClassId, ValueType};
use crate::registry::SelectorBuilder;

/// Folds `builder`'s targets (abstract targets included — an abstract
/// declaration still contributes a valid upper-bound type, even though it
/// never appears in `class_ids`) into a unified [`CallSignature`].
pub fn synthesize(
    builder: &SelectorBuilder,
    lattice: &TypeLattice,
    config: &BuilderConfig,
) -> Result<CallSignature> {
    let type_param_count = builder.param_info.type_param_count.unwrap_or(0);
    let positional_count = builder.param_info.positional_count;
    let named: Vec<String> = builder.param_info.named_params().to_vec();
    let total_slots = positional_count + named.len();

    let mut class_sets: Vec<Vec<ClassId>> = vec![Vec::new(); total_slots];
    let mut nullable = vec![false; total_slots];
    let mut boxed = vec![false; total_slots];

    let mut receiver_classes = Vec::with_capacity(builder.targets.len());
    let mut output_classes = Vec::new();
    let mut output_nullable = false;

    let member_name = builder
        .targets
        .values()
        .next()
        .map(|handle| handle.name.clone())
        .unwrap_or_default();

    for (&class_id, handle) in &builder.targets {
        receiver_classes.push(class_id);

        for (i, slot) in handle.positional.iter().enumerate() {
            if i >= positional_count {
                continue;
            }
            class_sets[i].push(slot.ty.class_id);
            nullable[i] |= slot.ty.nullable;
            boxed[i] |= slot.covariant;
        }

        for (name, slot) in &handle.named {
            if let Some(idx) = named.iter().position(|n| n == name) {
                let slot_idx = positional_count + idx;
                class_sets[slot_idx].push(slot.ty.class_id);
                nullable[slot_idx] |= slot.ty.nullable;
                boxed[slot_idx] |= slot.covariant;
            }
        }

        // An implementation's output count is always 0 or 1 by construction
        // (`MemberHandle::return_type: Option<TypeRef>`), so the "more
        // outputs than return_count" InternalInvariant case from §9 can
        // never arise here: the type system rules it out.
        match handle.return_type {
            Some(ty) => {
                output_classes.push(ty.class_id);
                output_nullable |= ty.nullable;
            }
            None if builder.return_count == 1 => {
                // a target without a value where the selector as a whole
                // returns one: the missing output counts as absent (null).
                output_nullable = true;
            }
            None => {}
        }
    }

    for i in 0..positional_count {
        boxed[i] |= builder.param_info.admits_positional_sentinel(i);
    }
    for (idx, name) in named.iter().enumerate() {
        boxed[positional_count + idx] |= builder.param_info.admits_named_sentinel(name);
    }

    if member_name == config.equality_operator_name && positional_count > 0 {
        nullable[0] = false;
    }

    let mut inputs = Vec::with_capacity(1 + type_param_count + total_slots);

    let receiver_class = lattice.upper_bound(&receiver_classes);
    inputs.push(lattice.value_type_for(receiver_class, false, true));

    for _ in 0..type_param_count {
        inputs.push(ValueType::new(config.type_param_repr_class_id, false, false));
    }

    for i in 0..total_slots {
        let class = lattice.upper_bound(&class_sets[i]);
        inputs.push(lattice.value_type_for(class, nullable[i], boxed[i]));
    }

    let outputs = if builder.return_count == 1 {
        let class = lattice.upper_bound(&output_classes);
        vec![lattice.value_type_for(class, output_nullable, false)]
    } else {
        Vec::new()
    };

    log::debug!(
        "synthesized signature for {}: {} input(s), {} output(s)",
        builder.id,
        inputs.len(),
        outputs.len()
    );

    Ok(CallSignature { inputs, outputs })
}
