use crate::tree::Balancer;

/// The do-nothing strategy: every hook is the trait default.
pub struct BstBalancer;

impl<T, U> Balancer<T, U> for BstBalancer {
    type Meta = ();
}
