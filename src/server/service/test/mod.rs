mod gym_contribution;
